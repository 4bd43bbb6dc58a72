use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("No header row found in interest ledger: expected 'fecha', 'nit' and 'cuenta' within the first {0} rows")]
    MissingHeader(usize),

    #[error("Cannot parse amount value: {0:?}")]
    ParseAmount(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
