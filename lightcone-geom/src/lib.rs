#![doc = r#"
lightcone-geom: local spacetime geometry for an accelerated observer

This crate provides:
- rindler_metric: the 4x4 local metric measured by a uniformly
  accelerating and/or rotating observer in otherwise flat space
- BackgroundMetric: the injected world-curvature capability, with
  FlatBackground as the do-nothing default

Proper acceleration, unlike velocity, is frame-detectable: an accelerating
observer measures locally curved geometry even over a flat background. The
metric built here reduces exactly to Minkowski when both the acceleration
and the angular velocity vanish.
"#]

use lightcone_core::{FourVector, Metric, Scalar, Vec3};

const ANGULAR_EPSILON: Scalar = 1e-24;

/// Local metric at `position` (expressed in the observer's instantaneous
/// rest frame, c·time units) for an observer with the given proper
/// acceleration and angular velocity.
///
/// lin_fac = (1 + a.r/c^2)^2 captures the Rindler time-dilation gradient
/// along the acceleration axis; ang_fac = ((w.r)/c)^2 the rotational
/// distortion. The spatial block stays -I; the distortion lives entirely in
/// the time row/column.
pub fn rindler_metric(
    position: FourVector,
    proper_accel: Vec3,
    angular_velocity: Vec3,
    c: Scalar,
) -> Metric {
    let r = position.spatial();
    if !r.is_finite() || !proper_accel.is_finite() || !angular_velocity.is_finite() {
        return Metric::minkowski();
    }

    let lin = 1.0 + proper_accel.dot(r) / (c * c);
    let lin_fac = lin * lin;
    let ang = angular_velocity.dot(r) / c;
    let ang_fac = ang * ang;

    let w_sqr = angular_velocity.norm_sqr();
    let ang_vec = if w_sqr > ANGULAR_EPSILON {
        angular_velocity * (2.0 * ang_fac / (c * w_sqr.sqrt()))
    } else {
        Vec3::ZERO
    };

    let mut metric = Metric::minkowski();
    let g = &mut metric.g.m;
    g[0][3] = -ang_vec.x;
    g[1][3] = -ang_vec.y;
    g[2][3] = -ang_vec.z;
    g[3][0] = -ang_vec.x;
    g[3][1] = -ang_vec.y;
    g[3][2] = -ang_vec.z;
    g[3][3] = lin_fac - ang_fac;
    metric
}

/// Injected world-curvature capability. The engine only consumes this; it
/// never implements a curved background itself.
pub trait BackgroundMetric {
    /// Local background metric at a world-frame point.
    fn metric_at(&self, point: Vec3) -> Metric;
}

/// Flat default: every point is Minkowski.
pub struct FlatBackground;

impl BackgroundMetric for FlatBackground {
    #[inline]
    fn metric_at(&self, _point: Vec3) -> Metric {
        Metric::minkowski()
    }
}
