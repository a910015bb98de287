//! Input validation errors.
//!
//! The core fails only at construction time: bad build descriptors
//! are rejected before a simulation exists. Once constructed, `step`
//! and `run` cannot fail - every runtime condition (dead targets,
//! zero-length vectors, coincident positions) has an explicit branch
//! in the simulation itself.

use thiserror::Error;

/// Errors reported while validating battle inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// The supplied configuration or build descriptor is unusable.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the input.
        reason: String,
    },
}

impl SimError {
    /// Shorthand for an [`SimError::InvalidInput`] with a formatted reason.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_reason() {
        let err = SimError::invalid("unknown hero id 'gloom'");
        assert_eq!(err.to_string(), "invalid input: unknown hero id 'gloom'");
    }
}
