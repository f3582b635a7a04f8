//! Compression error types.

use crate::network::NetworkError;

use super::CompressionMethod;

/// Errors from a compression run.
#[derive(Debug, thiserror::Error)]
pub enum CompressionError {
    /// Network construction, solving or result mapping failed
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The configured method has no implementation
    #[error("compression method {0} is not supported")]
    Unsupported(CompressionMethod),

    /// Writing a debug trace failed
    #[error("failed to write trace: {0}")]
    Trace(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::EventId;

    #[test]
    fn error_display() {
        let err = CompressionError::Unsupported(CompressionMethod::IntegerProgramming);
        assert_eq!(
            err.to_string(),
            "compression method IntegerProgramming is not supported"
        );

        let err = CompressionError::from(NetworkError::Cycle { event: EventId(2) });
        assert_eq!(err.to_string(), "cycle detected through event e2");
    }
}
