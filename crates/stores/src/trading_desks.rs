use crate::error::StoreError;
use core_types::DeskAssignment;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// Reads the trading-desk store that places every book in the four-level
/// hierarchy.
///
/// Expected header:
/// `book_id,business_unit,sub_business_unit,trading_desk,book`
pub fn read_trading_desks(path: impl AsRef<Path>) -> Result<Vec<DeskAssignment>, StoreError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading trading desk store");
    trading_desks_from_reader(crate::open_store(path)?)
}

pub fn trading_desks_from_reader<R: Read>(reader: R) -> Result<Vec<DeskAssignment>, StoreError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut assignments = Vec::new();
    let mut seen = HashSet::new();

    for record in csv_reader.deserialize() {
        let assignment: DeskAssignment = record?;
        if !seen.insert(assignment.book_id.clone()) {
            return Err(StoreError::DuplicateKey {
                store: "Trading Desk",
                key: assignment.book_id,
            });
        }
        assignments.push(assignment);
    }

    tracing::debug!(count = assignments.len(), "trading desk store loaded");
    Ok(assignments)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
book_id,business_unit,sub_business_unit,trading_desk,book
B_01,Forex,FX Options,EMEA Vol,Book A
B_02,Forex,FX Options,EMEA Vol,Book B
B_03,Forex,FX Spot,Americas Flow,Book C
";

    #[test]
    fn parses_the_hierarchy_table() {
        let desks = trading_desks_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(desks.len(), 3);
        assert_eq!(
            desks[0].path_segments(),
            ["Forex", "FX Options", "EMEA Vol", "Book A"]
        );
    }

    #[test]
    fn a_book_belongs_to_exactly_one_desk() {
        let doubled = format!("{SAMPLE}B_01,Forex,FX Spot,EMEA Vol,Book A\n");
        assert!(matches!(
            trading_desks_from_reader(doubled.as_bytes()).unwrap_err(),
            StoreError::DuplicateKey {
                store: "Trading Desk",
                ..
            }
        ));
    }
}
