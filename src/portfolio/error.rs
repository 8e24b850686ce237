//! Error types for portfolio evaluation and report packaging.

use std::fmt;

use crate::pricing::PricingError;

/// Errors raised while evaluating or packaging a portfolio.
#[derive(Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// A position failed to price; carries its index and identifier.
    Position {
        /// Zero-based index in the input order.
        index: usize,
        /// Position identifier.
        id: String,
        /// Underlying pricing failure.
        source: PricingError,
    },

    /// Serialization of a report failed.
    SerializationError {
        /// Error message from the serializer.
        message: String,
    },

    /// Deserialization of positions or a report failed.
    DeserializationError {
        /// Error message from the deserializer.
        message: String,
    },

    /// A report package checksum does not match its contents.
    ChecksumMismatch {
        /// Checksum stored in the package.
        expected: String,
        /// Checksum recomputed from the contents.
        actual: String,
    },

    /// The requested operation is not valid for the given data.
    InvalidOperation {
        /// Description of the problem.
        message: String,
    },
}

impl fmt::Display for PortfolioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortfolioError::Position { index, id, source } => {
                write!(f, "position {index} ({id}) failed: {source}")
            }
            PortfolioError::SerializationError { message } => {
                write!(f, "serialization error: {message}")
            }
            PortfolioError::DeserializationError { message } => {
                write!(f, "deserialization error: {message}")
            }
            PortfolioError::ChecksumMismatch { expected, actual } => {
                write!(f, "checksum mismatch: expected {expected}, got {actual}")
            }
            PortfolioError::InvalidOperation { message } => {
                write!(f, "invalid operation: {message}")
            }
        }
    }
}

impl std::error::Error for PortfolioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PortfolioError::Position { source, .. } => Some(source),
            _ => None,
        }
    }
}
