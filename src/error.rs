//! Error handling for the ATS scanner

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtsScannerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Enrichment error: {0}")]
    Enrichment(#[from] EnrichmentError),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

/// Failure of a single enrichment call. Every variant is recoverable: the
/// scanner answers it with the matching heuristic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnrichmentError {
    #[error("enrichment provider unavailable")]
    Unavailable,

    #[error("provider failed: {0}")]
    Provider(String),

    #[error("unparseable enrichment payload: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, AtsScannerError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for AtsScannerError {
    fn from(err: anyhow::Error) -> Self {
        AtsScannerError::Processing(err.to_string())
    }
}

impl From<serde_json::Error> for EnrichmentError {
    fn from(err: serde_json::Error) -> Self {
        EnrichmentError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrichment_error_converts() {
        let err: AtsScannerError = EnrichmentError::Provider("exit status 2".to_string()).into();
        assert_eq!(err.to_string(), "Enrichment error: provider failed: exit status 2");
    }

    #[test]
    fn test_json_error_becomes_parse_failure() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(EnrichmentError::from(json_err), EnrichmentError::Parse(_)));
    }

    #[test]
    fn test_anyhow_error_becomes_processing() {
        let err: AtsScannerError = anyhow::anyhow!("vocabulary build failed").into();
        assert!(matches!(err, AtsScannerError::Processing(ref msg) if msg == "vocabulary build failed"));
    }
}
