#![doc = r#"
lightcone-core: primitives for relativistic kinematics

This crate provides:
- Scalar, Vec3, FourVector and Matrix4 value types (signature diag(-1,-1,-1,+1),
  temporal component last, stored in c·time units)
- Metric: a 4x4 local metric tensor with Minkowski default
- Velocity algebra: add_velocity, gamma, inverse_gamma, rapidity_to_velocity
- lorentz_boost(v/c) building the standard 4x4 boost matrix
- Velocity3, a validated sub-luminal velocity wrapper, and KinematicsError

All runtime numerical faults are recovered locally with documented safe
defaults; only validating constructors return Result.
"#]

pub type Scalar = f64;

/// Fraction of c used when a degenerate velocity has to be rescaled below
/// the light-speed limit instead of rejected.
pub const JUST_BELOW_C: Scalar = 0.999_999;

mod boost;
mod error;
mod matrix;
mod metric;
mod vec;
mod velocity;

pub use boost::lorentz_boost;
pub use error::KinematicsError;
pub use matrix::Matrix4;
pub use metric::Metric;
pub use vec::{FourVector, Vec3};
pub use velocity::{
    add_velocity, clamp_speed, gamma, inverse_gamma, rapidity_to_velocity, Velocity3,
};
