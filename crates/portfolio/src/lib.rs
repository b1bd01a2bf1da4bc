//! # Portfolio Data Model
//!
//! This crate owns the joined view of the four stores and the hierarchy the
//! VaR figures are grouped by. It is a pure logic crate: it reads nothing
//! from disk and depends only on `core-types`.
//!
//! The split that matters here: positions, instruments and the desk
//! hierarchy are joined once into a [`PortfolioModel`], while each
//! pricing-model output stays a free-standing [`AnalyticsSource`]. Scenario evaluation swaps sources against the same
//! model, so quantities and joins are provably identical across scenarios.

// Declare the modules that make up this crate.
pub mod error;
pub mod hierarchy;
pub mod model;
pub mod source;

// Re-export the key components to create a clean, public-facing API.
pub use error::{BrokenReferences, ModelError};
pub use hierarchy::{DeskTree, NodePath};
pub use model::PortfolioModel;
pub use source::AnalyticsSource;
