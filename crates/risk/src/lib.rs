//! # VaR Risk Engine
//!
//! This crate turns aggregated position vectors into Value-at-Risk figures.
//! It is a pure logic crate: no I/O, no state beyond the per-source vector
//! cache inside [`VarCalculator`].
//!
//! ## Public API
//!
//! - `lower_tail_quantile`: the one quantile policy used everywhere
//!   (ascending sort, linear interpolation between order statistics).
//! - `VarCalculator`: VaR and Marginal VaR per hierarchy node for one
//!   analytics source.
//! - `ScenarioGrid`: the cross-product of analytics sources and confidence
//!   levels, producing a flat `VarReport`.

// Declare the modules that constitute this crate.
pub mod error;
pub mod quantile;
pub mod report;
pub mod scenarios;
pub mod var;

// Re-export the key components to create a clean, public-facing API.
pub use error::RiskError;
pub use quantile::lower_tail_quantile;
pub use report::{VarReport, VarReportRow};
pub use scenarios::{ConfidenceScenario, ScenarioGrid};
pub use var::VarCalculator;
