use crate::error::StoreError;
use core_types::{InstrumentAnalytics, PnlVector};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// The raw analytics row as it appears on disk. The vector arrives as one
/// semicolon-delimited cell and is split out in a second pass.
#[derive(Debug, Deserialize)]
struct AnalyticsRecord {
    instrument_code: String,
    pnl: Decimal,
    pnl_vector: String,
}

/// Reads one analytics store (a pricing-model output file).
///
/// The file is pipe-delimited with a semicolon-delimited `pnl_vector` cell:
/// `instrument_code|pnl|pnl_vector` where the vector cell looks like
/// `12.5;-3.1;...`. This matches the pricer export format, where a row holds
/// the full simulated PnL history of one instrument.
pub fn read_analytics(path: impl AsRef<Path>) -> Result<Vec<InstrumentAnalytics>, StoreError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading analytics store");
    analytics_from_reader(crate::open_store(path)?)
}

pub fn analytics_from_reader<R: Read>(reader: R) -> Result<Vec<InstrumentAnalytics>, StoreError> {
    let mut csv_reader = csv::ReaderBuilder::new().delimiter(b'|').from_reader(reader);
    let mut rows = Vec::new();
    let mut seen = HashSet::new();

    for record in csv_reader.deserialize() {
        let record: AnalyticsRecord = record?;
        if !seen.insert(record.instrument_code.clone()) {
            return Err(StoreError::DuplicateKey {
                store: "Instruments Analytics",
                key: record.instrument_code,
            });
        }
        let pnl_vector = parse_vector_cell(&record.instrument_code, &record.pnl_vector)?;
        rows.push(InstrumentAnalytics {
            instrument_code: record.instrument_code,
            pnl: record.pnl,
            pnl_vector,
        });
    }

    tracing::debug!(count = rows.len(), "analytics store loaded");
    Ok(rows)
}

/// Splits a semicolon-delimited cell into a `PnlVector`.
///
/// An empty cell is rejected here: a missing history would make every VaR
/// over this instrument undefined, and that must fail loudly at load time.
fn parse_vector_cell(code: &str, cell: &str) -> Result<PnlVector, StoreError> {
    if cell.trim().is_empty() {
        return Err(StoreError::EmptyVector {
            code: code.to_string(),
        });
    }

    let mut values = Vec::new();
    for raw in cell.split(';') {
        let raw = raw.trim();
        let value = Decimal::from_str(raw).map_err(|source| StoreError::BadVectorValue {
            code: code.to_string(),
            value: raw.to_string(),
            source,
        })?;
        values.push(value);
    }
    Ok(PnlVector::new(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = "\
instrument_code|pnl|pnl_vector
FXO_001|125.40|10.5;-3.25;0.0;7
FXO_002|-80.00|-1;-2;-3;-4
";

    #[test]
    fn parses_pipe_and_semicolon_delimiters() {
        let rows = analytics_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].pnl, dec!(125.40));
        assert_eq!(
            rows[0].pnl_vector.values(),
            &[dec!(10.5), dec!(-3.25), dec!(0.0), dec!(7)]
        );
        assert_eq!(rows[1].pnl_vector.len(), 4);
    }

    #[test]
    fn empty_vector_cells_fail_at_load_time() {
        let sample = "instrument_code|pnl|pnl_vector\nFXO_001|1.0|\n";
        let err = analytics_from_reader(sample.as_bytes()).unwrap_err();
        assert!(matches!(err, StoreError::EmptyVector { .. }));
    }

    #[test]
    fn garbage_vector_values_name_the_instrument() {
        let sample = "instrument_code|pnl|pnl_vector\nFXO_001|1.0|1.5;oops;2\n";
        match analytics_from_reader(sample.as_bytes()).unwrap_err() {
            StoreError::BadVectorValue { code, value, .. } => {
                assert_eq!(code, "FXO_001");
                assert_eq!(value, "oops");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let sample = "instrument_code|pnl|pnl_vector\nFXO_001|1|1;2\nFXO_001|2|3;4\n";
        assert!(matches!(
            analytics_from_reader(sample.as_bytes()).unwrap_err(),
            StoreError::DuplicateKey { .. }
        ));
    }
}
