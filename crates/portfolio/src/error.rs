use crate::hierarchy::NodePath;
use core_types::CoreError;
use std::fmt;
use thiserror::Error;

/// Every orphaned foreign key found while joining the stores.
///
/// Both lists hold (`instrument_code`, `book_id`) pairs so an operator can
/// locate the offending position rows; the whole batch is collected before
/// failing, never just the first offender.
#[derive(Debug, Default, PartialEq)]
pub struct BrokenReferences {
    /// Positions whose instrument is in neither the instrument store nor
    /// implied analytics.
    pub unknown_instruments: Vec<(String, String)>,
    /// Positions whose book does not appear in the trading-desk table.
    pub unknown_books: Vec<(String, String)>,
}

impl BrokenReferences {
    pub fn is_empty(&self) -> bool {
        self.unknown_instruments.is_empty() && self.unknown_books.is_empty()
    }
}

impl fmt::Display for BrokenReferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.unknown_instruments.is_empty() {
            write!(
                f,
                "{} position(s) reference unknown instruments: ",
                self.unknown_instruments.len()
            )?;
            format_pairs(f, &self.unknown_instruments)?;
        }
        if !self.unknown_books.is_empty() {
            if !self.unknown_instruments.is_empty() {
                write!(f, "; ")?;
            }
            write!(
                f,
                "{} position(s) reference unknown books: ",
                self.unknown_books.len()
            )?;
            format_pairs(f, &self.unknown_books)?;
        }
        Ok(())
    }
}

fn format_pairs(f: &mut fmt::Formatter<'_>, pairs: &[(String, String)]) -> fmt::Result {
    for (i, (instrument, book)) in pairs.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{instrument}/{book}")?;
    }
    Ok(())
}

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Positions reference missing keys: {0}")]
    BrokenReferences(BrokenReferences),

    #[error("Analytics source '{source_name}' has no rows for instrument(s): {missing:?}")]
    MissingAnalytics {
        source_name: String,
        missing: Vec<String>,
    },

    #[error("Unknown hierarchy node '{path}'")]
    UnknownNode { path: NodePath },

    #[error("No positions roll up into hierarchy node '{path}'")]
    EmptyNode { path: NodePath },

    #[error("Books '{first}' and '{second}' both map to hierarchy path '{path}'")]
    AmbiguousBook {
        path: NodePath,
        first: String,
        second: String,
    },

    #[error(transparent)]
    Vector(#[from] CoreError),
}
