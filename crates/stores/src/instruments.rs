use crate::error::StoreError;
use core_types::Instrument;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// Reads the instrument reference-data store.
///
/// Expected header:
/// `instrument_code,description,currency_pair,option_type,strike,maturity`
pub fn read_instruments(path: impl AsRef<Path>) -> Result<Vec<Instrument>, StoreError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading instruments store");
    instruments_from_reader(crate::open_store(path)?)
}

pub fn instruments_from_reader<R: Read>(reader: R) -> Result<Vec<Instrument>, StoreError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut instruments = Vec::new();
    let mut seen = HashSet::new();

    for record in csv_reader.deserialize() {
        let instrument: Instrument = record?;
        if !seen.insert(instrument.instrument_code.clone()) {
            return Err(StoreError::DuplicateKey {
                store: "Instruments",
                key: instrument.instrument_code,
            });
        }
        instruments.push(instrument);
    }

    tracing::debug!(count = instruments.len(), "instruments store loaded");
    Ok(instruments)
}
