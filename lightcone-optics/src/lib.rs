#![doc = r#"
lightcone-optics: world-space to optical-space projection

This crate provides:
- world_to_optical: where a moving observer visually perceives a world point,
  accounting for light travel delay, object motion and acceleration, the
  observer's local accelerated-frame metric, and aberration
- retarded_time: the (negative) light-delay time of the perceived image
- optical_to_world / optical_to_world_high_precision: the inverse map, as a
  closed form plus an emission-time solve and forward polish

Optical space is what a camera at the observer actually records: each world
point is displaced to where its light left it, so fast-moving scenes show
the familiar Terrell-Penrose distortions. The forward map is exact; the
inverse is exact for an observer at rest and approximate otherwise, which is
what the high-precision variant is for.
"#]

mod projector;

pub use projector::{
    optical_to_world, optical_to_world_high_precision, retarded_time, world_to_optical,
    ObjectKinematics, REFINE_MAX_ITERS, REFINE_TOLERANCE,
};
