//! Error types for the media scorer

use std::fmt;

/// Errors that can occur while decoding or scoring media
#[derive(Debug, Clone, PartialEq)]
pub enum ScorerError {
    /// The media source could not be opened (missing file, missing decoder,
    /// unreadable container)
    SourceUnavailable(String),

    /// The container opened but its streams could not be decoded
    DecodingError(String),

    /// Decoding did not finish before the configured deadline
    Timeout(String),

    /// Invalid configuration or inconsistent media
    InvalidInput(String),

    /// Analyzer-internal failure
    ProcessingError(String),

    /// Numerical error (undefined statistic, non-finite value)
    NumericalError(String),
}

impl ScorerError {
    /// True for errors that abort a scoring run instead of degrading a
    /// single component.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ScorerError::SourceUnavailable(_)
                | ScorerError::DecodingError(_)
                | ScorerError::Timeout(_)
                | ScorerError::InvalidInput(_)
        )
    }
}

impl fmt::Display for ScorerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScorerError::SourceUnavailable(msg) => write!(f, "Source unavailable: {}", msg),
            ScorerError::DecodingError(msg) => write!(f, "Decoding error: {}", msg),
            ScorerError::Timeout(msg) => write!(f, "Timed out: {}", msg),
            ScorerError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ScorerError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
            ScorerError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
        }
    }
}

impl std::error::Error for ScorerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        let e = ScorerError::SourceUnavailable("clip.mp4 not found".to_string());
        assert_eq!(e.to_string(), "Source unavailable: clip.mp4 not found");

        let e = ScorerError::NumericalError("zero variance".to_string());
        assert_eq!(e.to_string(), "Numerical error: zero variance");
    }

    #[test]
    fn test_fatal_classification() {
        assert!(ScorerError::SourceUnavailable(String::new()).is_fatal());
        assert!(ScorerError::Timeout(String::new()).is_fatal());
        assert!(!ScorerError::ProcessingError(String::new()).is_fatal());
        assert!(!ScorerError::NumericalError(String::new()).is_fatal());
    }
}
