//! Error types for textrank_core
//!
//! Configuration mistakes fail at the point of misuse. Numerical corner cases
//! (empty or fully dangling graphs) are never errors.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, TextRankError>;

/// Main error type for textrank_core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TextRankError {
    /// Configuration validation failed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// An edge weight that cannot take part in a probability distribution
    #[error("Invalid edge weight: {weight}")]
    InvalidWeight { weight: f64 },

    /// Two fingerprints of different sizes were compared
    #[error("Value size mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// The combined scan pattern could not be compiled
    #[error("Pattern error: {message}")]
    Pattern { message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl TextRankError {
    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid weight error
    pub fn invalid_weight(weight: f64) -> Self {
        Self::InvalidWeight { weight }
    }

    /// Create a length mismatch error
    pub fn length_mismatch(left: usize, right: usize) -> Self {
        Self::LengthMismatch { left, right }
    }

    /// Create a pattern error
    pub fn pattern(message: impl Into<String>) -> Self {
        Self::Pattern {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Check if this error was raised while validating configuration
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}

impl From<serde_json::Error> for TextRankError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<regex::Error> for TextRankError {
    fn from(err: regex::Error) -> Self {
        Self::pattern(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TextRankError::invalid_config("damping must be in (0, 1]");
        assert!(err.to_string().contains("Invalid configuration"));
        assert!(err.to_string().contains("damping"));

        let err = TextRankError::length_mismatch(4, 3);
        assert_eq!(err.to_string(), "Value size mismatch: 4 vs 3");
    }

    #[test]
    fn test_is_config_error() {
        assert!(TextRankError::invalid_config("x").is_config_error());
        assert!(!TextRankError::invalid_weight(-1.0).is_config_error());
    }

    #[test]
    fn test_from_serde_json() {
        let err: TextRankError = serde_json::from_str::<f64>("not json").unwrap_err().into();
        assert!(matches!(err, TextRankError::Serialization { .. }));
    }
}
