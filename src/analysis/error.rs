//! Analysis request errors

use thiserror::Error;

/// Banner text for a non-success response from the service
pub const STATUS_FAILURE_MESSAGE: &str = "Failed to analyze file";

/// Banner text when an error carries no usable message
pub const FALLBACK_FAILURE_MESSAGE: &str = "An error occurred";

/// Errors that can end an analysis request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Service answered with a non-success status
    #[error("Analysis service returned status {0}")]
    Status(u16),

    /// Request could not be sent or the connection failed
    #[error("{0}")]
    Transport(String),

    /// Response body is not a valid analysis result
    #[error("{0}")]
    Decode(String),

    /// Local file could not be read
    #[error("{0}")]
    Io(String),

    /// Configured request timeout elapsed
    #[error("Request timeout")]
    Timeout,
}

impl AnalysisError {
    /// Message shown in the error banner
    ///
    /// Status failures always read as the fixed generic message; everything
    /// else shows its own message, or the fallback when that is blank.
    pub fn failure_message(&self) -> String {
        match self {
            AnalysisError::Status(_) => STATUS_FAILURE_MESSAGE.to_string(),
            other => {
                let message = other.to_string();
                if message.trim().is_empty() {
                    FALLBACK_FAILURE_MESSAGE.to_string()
                } else {
                    message
                }
            }
        }
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        AnalysisError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_uses_generic_message() {
        let err = AnalysisError::Status(500);
        assert_eq!(err.to_string(), "Analysis service returned status 500");
        assert_eq!(err.failure_message(), "Failed to analyze file");
    }

    #[test]
    fn test_other_errors_keep_their_message() {
        let err = AnalysisError::Transport("connection refused".to_string());
        assert_eq!(err.failure_message(), "connection refused");

        assert_eq!(AnalysisError::Timeout.failure_message(), "Request timeout");
    }

    #[test]
    fn test_blank_message_falls_back() {
        let err = AnalysisError::Decode("   ".to_string());
        assert_eq!(err.failure_message(), "An error occurred");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: AnalysisError = json_err.into();
        assert!(matches!(err, AnalysisError::Decode(_)));
    }
}
