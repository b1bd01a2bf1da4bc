//! # CSV Stores
//!
//! This crate loads the four tables the VaR calculation runs on, one module
//! per store:
//!
//! - `instruments`: instrument reference data (comma-delimited).
//! - `analytics`: per-instrument PnL scalars and vectors (pipe-delimited,
//!   with semicolon-delimited array cells).
//! - `positions`: quantities held per instrument and book (comma-delimited).
//! - `trading_desks`: the book hierarchy table (comma-delimited).
//!
//! Each module exposes a `read_*` function taking a file path plus a
//! `*_from_reader` seam so tests can feed in-memory CSV. The stores only
//! parse and key-check; referential integrity across stores is the
//! `portfolio` crate's job.

use std::fs::File;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod analytics;
pub mod error;
pub mod instruments;
pub mod positions;
pub mod trading_desks;

// Re-export the key entry points to create a clean, public-facing API.
pub use analytics::read_analytics;
pub use error::StoreError;
pub use instruments::read_instruments;
pub use positions::read_positions;
pub use trading_desks::read_trading_desks;

/// Opens a store file, mapping the I/O error to one that names the path.
pub(crate) fn open_store(path: &Path) -> Result<File, StoreError> {
    File::open(path).map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })
}
