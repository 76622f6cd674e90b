//! Error types for sampler construction.

use thiserror::Error;

use crate::sampler::Dimension;

/// Errors raised while building samplers.
///
/// Construction is the only fallible phase. Once a sampler is built,
/// evaluation is a total function over all coordinates and has no error
/// class of its own: non-finite inputs propagate as NaN.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A composite sampler and one of its inputs disagree on dimensionality.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimensionality the composite was declared with.
        expected: Dimension,
        /// Dimensionality of the offending input.
        actual: Dimension,
    },

    /// Requested dimensionality outside {2, 3, 4}.
    #[error("unsupported dimensionality: {0} (expected 2, 3, or 4)")]
    UnsupportedDimensions(u8),

    /// A composite was given fewer inputs than its arity requires.
    #[error("{kind} requires {required} input(s), got {provided}")]
    MissingInputs {
        /// Operation name.
        kind: &'static str,
        /// Inputs the operation requires.
        required: usize,
        /// Inputs actually provided.
        provided: usize,
    },

    /// Permutation table size outside the supported power-of-two range.
    #[error("permutation table size must be a power of two in [4, 65536], got {0}")]
    InvalidTableSize(usize),

    /// Any other parameter that fails validation.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::DimensionMismatch {
            expected: Dimension::D2,
            actual: Dimension::D3,
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 2d, got 3d");

        let err = ConfigError::MissingInputs {
            kind: "blend",
            required: 3,
            provided: 1,
        };
        assert_eq!(err.to_string(), "blend requires 3 input(s), got 1");

        let err = ConfigError::InvalidTableSize(100);
        assert_eq!(
            err.to_string(),
            "permutation table size must be a power of two in [4, 65536], got 100"
        );
    }
}
