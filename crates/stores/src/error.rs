use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to open store file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Malformed CSV record: {0}")]
    Csv(#[from] csv::Error),

    #[error("Duplicate {store} key '{key}'")]
    DuplicateKey { store: &'static str, key: String },

    #[error("Instrument '{code}': PnL vector cell is empty")]
    EmptyVector { code: String },

    #[error("Instrument '{code}': bad PnL vector value '{value}': {source}")]
    BadVectorValue {
        code: String,
        value: String,
        source: rust_decimal::Error,
    },
}
