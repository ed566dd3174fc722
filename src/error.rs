use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkerError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("API key not set. Run `faculty-linker config --set-api-key YOUR_KEY` or set FACULTY_ORACLE_API_KEY")]
    MissingApiKey,

    #[error("Input not found: {0}")]
    MissingInput(String),

    #[error("Malformed input {artifact}: {reason}")]
    MalformedInput { artifact: String, reason: String },

    #[error("Classification oracle unavailable: {0}")]
    OracleUnavailable(String),

    #[error("Classification oracle timed out after {0}s")]
    OracleTimeout(u64),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel write error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),

    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::Error),

    #[error(transparent)]
    Common(#[from] faculty_common::Error),
}

impl LinkerError {
    pub fn malformed(artifact: impl std::fmt::Display, reason: impl std::fmt::Display) -> Self {
        LinkerError::MalformedInput {
            artifact: artifact.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Per-record failures the pipeline degrades instead of aborting on
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LinkerError::OracleUnavailable(_) | LinkerError::OracleTimeout(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LinkerError>;
