use crate::error::StoreError;
use core_types::Position;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// Reads the positions store.
///
/// Expected header: `instrument_code,book_id,quantity,purchase_price`.
/// The composite key is (`instrument_code`, `book_id`).
pub fn read_positions(path: impl AsRef<Path>) -> Result<Vec<Position>, StoreError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading positions store");
    positions_from_reader(crate::open_store(path)?)
}

pub fn positions_from_reader<R: Read>(reader: R) -> Result<Vec<Position>, StoreError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut positions = Vec::new();
    let mut seen = HashSet::new();

    for record in csv_reader.deserialize() {
        let position: Position = record?;
        let key = (position.instrument_code.clone(), position.book_id.clone());
        if !seen.insert(key) {
            return Err(StoreError::DuplicateKey {
                store: "Positions",
                key: format!("{}/{}", position.instrument_code, position.book_id),
            });
        }
        positions.push(position);
    }

    tracing::debug!(count = positions.len(), "positions store loaded");
    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = "\
instrument_code,book_id,quantity,purchase_price
FXO_001,B_01,1500,0.0210
FXO_001,B_02,-300,0.0195
FXO_002,B_01,850,0.0130
";

    #[test]
    fn parses_positions_with_decimal_quantities() {
        let positions = positions_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(positions.len(), 3);
        assert_eq!(positions[1].quantity, dec!(-300));
        assert_eq!(positions[2].purchase_price, dec!(0.0130));
    }

    #[test]
    fn same_instrument_in_two_books_is_fine() {
        let positions = positions_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(positions[0].instrument_code, positions[1].instrument_code);
        assert_ne!(positions[0].book_id, positions[1].book_id);
    }

    #[test]
    fn duplicate_composite_keys_are_rejected() {
        let doubled = format!("{SAMPLE}FXO_001,B_01,10,0.02\n");
        match positions_from_reader(doubled.as_bytes()).unwrap_err() {
            StoreError::DuplicateKey { store, key } => {
                assert_eq!(store, "Positions");
                assert_eq!(key, "FXO_001/B_01");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
