// src/utils/error.rs
use thiserror::Error;

/// Reasons a booktitle could not be turned into an address.
/// None of these are fatal: the entry is simply left as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Entry has no booktitle field")]
    NoBookTitle,

    #[error("No conference short name with year found in: {0}")]
    NoShortNameMarker(String),

    #[error("City or country missing after short name in: {0}")]
    IncompleteAddress(String),

    #[error("Detected address looks like a date range in: {0}")]
    DegenerateAddress(String),
}

impl ExtractError {
    /// Short machine-readable tag used in CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::NoBookTitle => "no_booktitle",
            ExtractError::NoShortNameMarker(_) => "no_short_name_marker",
            ExtractError::IncompleteAddress(_) => "incomplete_address",
            ExtractError::DegenerateAddress(_) => "degenerate_address",
        }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Invalid bibliography input: {0}")]
    Input(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
