//! Core types shared by the sequence generators and correlators.

/// A single binary chip (always 0 or 1).
pub type Bit = u8;

/// Result type for sequence operations
pub type SequenceResult<T> = Result<T, SequenceError>;

/// Errors that can occur while building or combining sequences
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Dimension mismatch: expected {expected} bits, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl SequenceError {
    /// Build an `InvalidConfig` error and report it through `tracing`.
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::warn!("{}", msg);
        SequenceError::InvalidConfig(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SequenceError::InvalidConfig("width 40 out of range".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: width 40 out of range");

        let err = SequenceError::DimensionMismatch {
            expected: 15,
            actual: 31,
        };
        assert_eq!(err.to_string(), "Dimension mismatch: expected 15 bits, got 31");
    }

    #[test]
    fn test_invalid_helper() {
        let err = SequenceError::invalid("state must be non-zero");
        assert!(matches!(err, SequenceError::InvalidConfig(ref m) if m.contains("non-zero")));
    }
}
