//! Error types for Arrange layout operations.
//!
//! [`LayoutError`] separates configuration problems, which are reported
//! before any computation starts, from execution failures raised inside a
//! layout algorithm. Execution failures are always wrapped with the name of
//! the algorithm that produced them.

use thiserror::Error;

/// The main error type for layout operations.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Layout configuration does not name an algorithm")]
    MissingAlgorithm,

    #[error("Layout algorithm `{0}` is not registered")]
    UnknownAlgorithm(String),

    #[error("Invalid configuration for `{algorithm}`: {reason}")]
    InvalidConfig { algorithm: String, reason: String },

    #[error("Layout template `{0}` does not exist")]
    UnknownTemplate(String),

    #[error("Layout algorithm `{algorithm}` failed: {source}")]
    Execution {
        algorithm: String,
        #[source]
        source: Box<LayoutError>,
    },

    #[error("Layout computation error: {0}")]
    Computation(String),
}

impl LayoutError {
    /// Wrap an error raised by the algorithm named `algorithm`.
    pub fn execution(algorithm: impl Into<String>, source: LayoutError) -> Self {
        Self::Execution {
            algorithm: algorithm.into(),
            source: Box::new(source),
        }
    }

    /// Returns true for errors the caller fixes by changing the configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::MissingAlgorithm
                | Self::UnknownAlgorithm(_)
                | Self::InvalidConfig { .. }
                | Self::UnknownTemplate(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_execution_error_keeps_algorithm_and_source() {
        let err = LayoutError::execution(
            "force-directed",
            LayoutError::Computation("no position for node `a`".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "Layout algorithm `force-directed` failed: Layout computation error: no position for node `a`"
        );
        assert!(err.source().is_some());
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_config_errors() {
        assert!(LayoutError::MissingAlgorithm.is_config_error());
        assert!(LayoutError::UnknownAlgorithm("x".to_string()).is_config_error());
        assert!(
            LayoutError::InvalidConfig {
                algorithm: "grid".to_string(),
                reason: "bad".to_string()
            }
            .is_config_error()
        );
    }
}
