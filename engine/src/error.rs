use thiserror::Error;

/// A single field that blocked a manual submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error("Text encoding error: {0}")]
    EncodingError(String),

    #[error("Spreadsheet read error: {source}")]
    SpreadsheetReadError {
        #[from]
        source: calamine::Error,
    },

    #[error("Spreadsheet write error: {source}")]
    SpreadsheetWriteError {
        #[from]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("Invalid keyword pattern: {source}")]
    PatternError {
        #[from]
        source: regex::Error,
    },

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Validation failed: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("Internal processing error: {0}")]
    ProcessingError(String),

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl EngineError {
    /// Field-level messages when this is a validation failure.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            EngineError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_every_field() {
        let err = EngineError::Validation(vec![
            FieldError { field: "NUMERO_LAUDO", message: "required".to_string() },
            FieldError { field: "FROTA", message: "at least one unit is required".to_string() },
        ]);
        let msg = err.to_string();
        assert!(msg.contains("NUMERO_LAUDO: required"));
        assert!(msg.contains("FROTA: at least one unit is required"));
        assert_eq!(err.field_errors().len(), 2);
    }

    #[test]
    fn io_errors_convert() {
        let err: EngineError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, EngineError::IoError { .. }));
        assert!(err.field_errors().is_empty());
    }
}
