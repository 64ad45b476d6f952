use rust_decimal::Decimal;
use thiserror::Error;

/// Failures raised while reading or writing the persisted budget record.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Error type that captures ledger transition failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Persistence error: {0}")]
    Storage(#[from] StorageError),
    #[error("Percentages must equal 100 (got {total})")]
    PercentageSumInvalid { total: Decimal },
    #[error("Percentage {value} is outside 0..=100")]
    PercentageOutOfRange { value: Decimal },
}

/// Failures raised while loading or saving the application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed configuration: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Fatal shell errors; anything here ends the process.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Line editor failure: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
