#![doc = r#"
lightcone-frame: the observer's per-tick integrator

This crate provides:
- ObservationState: the observer's velocity, proper acceleration, angular
  velocity, position, orientation, accumulated proper/world time and cached
  boost matrices
- ObservationState::tick(dt): the once-per-tick state advance
- queue_rotation: axis-angle orientation input consumed by the next tick

One ObservationState is created at simulation start and mutated exactly once
per tick by the host loop. Everything else reads it. The read-after-write
ordering (tick before any optical projection for that tick) is the caller's
responsibility; within a tick all projection calls are pure reads.
"#]

use lightcone_core::{
    add_velocity, clamp_speed, inverse_gamma, lorentz_boost, rapidity_to_velocity,
    KinematicsError, Matrix4, Scalar, Vec3, Velocity3,
};
use log::warn;

const ZERO_EPSILON: Scalar = 1e-24;

/// Default maximum observer speed as a fraction of c. A numerical safety
/// net, not a gameplay limit: integration error can push the stored
/// velocity at or past c, and the clamp pulls it back each tick.
pub const DEFAULT_MAX_SPEED_FRACTION: Scalar = 0.999;

/// The observer's full kinematic state.
///
/// Fields are public for inspection and for hosts that stream state in from
/// elsewhere; the cached boost matrices are refreshed on every tick and by
/// the setter methods, so direct field writes become consistent at the next
/// tick boundary.
#[derive(Clone, Debug)]
pub struct ObservationState {
    /// Configured speed of light, world units per second.
    pub c: Scalar,
    /// Hard speed clamp, strictly below c.
    pub max_speed: Scalar,
    /// Current velocity in world units.
    pub velocity: Vec3,
    /// Proper acceleration felt by the observer.
    pub proper_accel: Vec3,
    /// Angular velocity derived from the orientation change of the last tick.
    pub angular_velocity: Vec3,
    /// World-frame position.
    pub position: Vec3,
    /// Forward-facing orientation reference, unit length.
    pub forward: Vec3,
    /// Cached boost into the observer's instantaneous rest frame,
    /// lorentz_boost(-velocity / c).
    pub boost: Matrix4,
    /// Cached inverse of `boost`, lorentz_boost(velocity / c).
    pub inv_boost: Matrix4,
    /// Accumulated proper time, seconds.
    pub proper_time: Scalar,
    /// Accumulated world (coordinate) time, seconds.
    pub world_time: Scalar,
    queued_rotation: Vec3,
}

impl ObservationState {
    /// Zero state at the origin for a given speed of light.
    pub fn new(c: Scalar) -> Result<Self, KinematicsError> {
        if !(c.is_finite() && c > 0.0) {
            return Err(KinematicsError::InvalidSpeedOfLight(c));
        }
        Ok(Self {
            c,
            max_speed: DEFAULT_MAX_SPEED_FRACTION * c,
            velocity: Vec3::ZERO,
            proper_accel: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            position: Vec3::ZERO,
            forward: Vec3::new(0.0, 0.0, 1.0),
            boost: Matrix4::IDENTITY,
            inv_boost: Matrix4::IDENTITY,
            proper_time: 0.0,
            world_time: 0.0,
            queued_rotation: Vec3::ZERO,
        })
    }

    /// Replace the velocity with a validated one and refresh the caches.
    pub fn set_velocity(&mut self, v: Velocity3) {
        self.velocity = v.get();
        self.rebuild_boost();
    }

    /// Set the hard speed clamp; must be positive and strictly below c.
    pub fn set_max_speed(&mut self, max_speed: Scalar) -> Result<(), KinematicsError> {
        if !(max_speed.is_finite() && max_speed > 0.0 && max_speed < self.c) {
            return Err(KinematicsError::SuperluminalVelocity { speed: max_speed, c: self.c });
        }
        self.max_speed = max_speed;
        Ok(())
    }

    /// Queue an axis-angle rotation (radians) to be applied by the next tick.
    /// Repeated calls within one tick accumulate.
    pub fn queue_rotation(&mut self, delta: Vec3) {
        if delta.is_finite() {
            self.queued_rotation += delta;
        } else {
            warn!("non-finite rotation delta dropped");
        }
    }

    /// Advance the state by one tick of proper duration `dt`.
    ///
    /// Order: speed clamp, time-dilation factor, clock advance, velocity and
    /// position update, boost cache rebuild, rotation integration. A
    /// non-finite time-dilation factor suppresses the clock, velocity and
    /// position updates for this tick; the observer is treated as momentarily
    /// stationary rather than letting NaN reach the accumulated state.
    pub fn tick(&mut self, dt: Scalar) {
        if !(dt.is_finite() && dt > 0.0) {
            warn!("ignoring tick with invalid duration {dt}");
            return;
        }

        // 1. clamp drifted speed
        self.velocity = clamp_speed(self.velocity, self.max_speed);

        // 2. time-dilation factor
        let inv_gamma = inverse_gamma(self.velocity, self.c, None);
        if inv_gamma.is_finite() && inv_gamma > 0.0 {
            // 3. clocks: proper time by dt, world time dilated
            self.proper_time += dt;
            self.world_time += dt / inv_gamma;

            // velocity through the rapidity map, so |v| < c by construction
            if self.proper_accel.norm_sqr() > ZERO_EPSILON {
                let dv = rapidity_to_velocity(self.proper_accel * dt, self.c, None);
                self.velocity = add_velocity(self.velocity, dv, self.c);
            }
            self.position += self.velocity * (dt / inv_gamma);
        } else {
            warn!("time-dilation factor not finite; suppressing tick accumulation");
        }

        // 4. rebuild the cached boost for the current velocity
        self.rebuild_boost();

        // 5. rotation: apply the queued delta, then derive angular velocity
        // from the forward-vector change over this tick
        let previous_forward = self.forward;
        let delta = self.queued_rotation;
        self.queued_rotation = Vec3::ZERO;
        if delta.norm_sqr() > ZERO_EPSILON {
            if let Some(axis) = delta.normalized() {
                let rotated = rotate_axis_angle(self.forward, axis, delta.norm());
                self.forward = rotated.normalized().unwrap_or(previous_forward);
            }
        }
        self.angular_velocity = angular_rate(previous_forward, self.forward, dt);
    }

    fn rebuild_boost(&mut self) {
        let vpc = self.velocity * (-1.0 / self.c);
        self.boost = lorentz_boost(vpc);
        self.inv_boost = lorentz_boost(-vpc);
    }
}

/// Rodrigues rotation of `v` about unit `axis` by `angle` radians.
fn rotate_axis_angle(v: Vec3, axis: Vec3, angle: Scalar) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    v * cos + axis.cross(v) * sin + axis * (axis.dot(v) * (1.0 - cos))
}

/// Angular velocity that carries `from` to `to` over `dt`.
fn angular_rate(from: Vec3, to: Vec3, dt: Scalar) -> Vec3 {
    let cross = from.cross(to);
    let angle = cross.norm().atan2(from.dot(to).clamp(-1.0, 1.0));
    match cross.normalized() {
        Some(axis) if angle > 1e-12 => axis * (angle / dt),
        _ => Vec3::ZERO,
    }
}
