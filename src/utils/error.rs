use std::path::PathBuf;
use thiserror::Error;

/// Every failure surfaced by the record types and the command line tool.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Invalid {record} fields: {message}")]
    SchemaError {
        record: &'static str,
        message: String,
    },

    #[error("JSON parsing error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("File not found: {}", path.display())]
    NotFoundError { path: PathBuf },

    #[error("IO error at {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Schema,
    Parse,
    Filesystem,
    Rendering,
    Validation,
    Configuration,
}

impl RecordError {
    /// Wraps an IO failure, singling out missing files.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            RecordError::NotFoundError { path }
        } else {
            RecordError::IoError { path, source }
        }
    }

    /// Coarse grouping used for logging.
    pub fn category(&self) -> ErrorCategory {
        match self {
            RecordError::SchemaError { .. } => ErrorCategory::Schema,
            RecordError::ParseError(_) => ErrorCategory::Parse,
            RecordError::NotFoundError { .. } | RecordError::IoError { .. } => {
                ErrorCategory::Filesystem
            }
            RecordError::CsvError(_) => ErrorCategory::Rendering,
            RecordError::ValidationError { .. } => ErrorCategory::Validation,
            RecordError::ConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    /// Hint printed under the error message by the command line tool.
    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Schema => "Remove unknown keys and check the value types of each field",
            ErrorCategory::Parse => "Check that the input is well-formed JSON",
            ErrorCategory::Filesystem => {
                "Check that the path exists and that you have permission to access it"
            }
            ErrorCategory::Rendering => "Retry the export; the table could not be written",
            ErrorCategory::Validation => "Correct the highlighted field and try again",
            ErrorCategory::Configuration => "Check the configuration file and command-line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, RecordError>;
