use thiserror::Error;

use crate::Scalar;

/// Construction-time validation failures. Runtime numerics never surface
/// these; degenerate inputs are recovered with safe defaults instead.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum KinematicsError {
    #[error("velocity magnitude {speed} is at or above the speed of light {c}")]
    SuperluminalVelocity { speed: Scalar, c: Scalar },

    #[error("non-finite component in input vector")]
    NonFiniteInput,

    #[error("speed of light must be finite and positive, got {0}")]
    InvalidSpeedOfLight(Scalar),
}
