//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while configuring or stepping the reactor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid configuration: {field} = {value} (expected {reason})")]
    InvalidConfig {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<cstr_core::CoreError> for SimError {
    fn from(e: cstr_core::CoreError) -> Self {
        match e {
            cstr_core::CoreError::NonFinite { what, value } => SimError::NonFinite { what, value },
            cstr_core::CoreError::OutOfRange {
                what,
                value,
                expected,
            } => SimError::InvalidConfig {
                field: what,
                value,
                reason: expected,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cstr_core::{ensure_finite, ensure_positive};

    #[test]
    fn core_errors_map_onto_config_errors() {
        let err: SimError = ensure_positive(-2.0, "geometry.volume").unwrap_err().into();
        assert_eq!(
            err,
            SimError::InvalidConfig {
                field: "geometry.volume",
                value: -2.0,
                reason: "> 0",
            }
        );

        let err: SimError = ensure_finite(f64::INFINITY, "fluid.density")
            .unwrap_err()
            .into();
        assert!(matches!(err, SimError::NonFinite { what: "fluid.density", .. }));
    }
}
