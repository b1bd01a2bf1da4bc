pub mod enums;
pub mod error;
pub mod structs;
pub mod vector;

// Re-export the core types to provide a clean public API.
pub use enums::{HierarchyLevel, OptionType};
pub use error::CoreError;
pub use structs::{DeskAssignment, Instrument, InstrumentAnalytics, Position};
pub use vector::PnlVector;
