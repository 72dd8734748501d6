use log::warn;

use crate::{KinematicsError, Metric, Scalar, Vec3, JUST_BELOW_C};

const ZERO_EPSILON: Scalar = 1e-24;

/// A 3-velocity validated to be finite and strictly sub-luminal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Velocity3(Vec3);

impl Velocity3 {
    pub const ZERO: Velocity3 = Velocity3(Vec3::ZERO);

    pub fn new(v: Vec3, c: Scalar) -> Result<Self, KinematicsError> {
        if !(c.is_finite() && c > 0.0) {
            return Err(KinematicsError::InvalidSpeedOfLight(c));
        }
        if !v.is_finite() {
            return Err(KinematicsError::NonFiniteInput);
        }
        let speed = v.norm();
        if speed >= c {
            return Err(KinematicsError::SuperluminalVelocity { speed, c });
        }
        Ok(Self(v))
    }

    /// Rescale instead of rejecting: non-finite input collapses to zero,
    /// an at-or-above-c magnitude is pulled just below c.
    pub fn clamped(v: Vec3, c: Scalar) -> Self {
        if !v.is_finite() {
            warn!("non-finite velocity clamped to zero");
            return Self(Vec3::ZERO);
        }
        Self(clamp_speed(v, JUST_BELOW_C * c))
    }

    #[inline]
    pub fn get(self) -> Vec3 {
        self.0
    }
}

/// Rescale v to at most `limit` magnitude. Non-finite input is returned
/// unchanged so that downstream NaN detection still fires.
#[inline]
pub fn clamp_speed(v: Vec3, limit: Scalar) -> Vec3 {
    let n2 = v.norm_sqr();
    if n2.is_finite() && limit > 0.0 && n2 > limit * limit {
        v * (limit / n2.sqrt())
    } else {
        v
    }
}

#[inline]
fn speed_sqr(v: Vec3, metric: Option<&Metric>) -> Scalar {
    match metric {
        // spatial block is negative-definite; negate to get a magnitude
        Some(g) => -g.spatial_quadratic(v),
        None => v.norm_sqr(),
    }
}

/// Lorentz factor 1/sqrt(1 - |v|^2/c^2). NaN sentinel at |v| >= c or for
/// non-finite input.
pub fn gamma(v: Vec3, c: Scalar, metric: Option<&Metric>) -> Scalar {
    let s2 = speed_sqr(v, metric);
    if !s2.is_finite() || s2 >= c * c {
        return Scalar::NAN;
    }
    1.0 / (1.0 - s2 / (c * c)).sqrt()
}

/// Reciprocal Lorentz factor sqrt(1 - |v|^2/c^2), same sentinel policy.
pub fn inverse_gamma(v: Vec3, c: Scalar, metric: Option<&Metric>) -> Scalar {
    let s2 = speed_sqr(v, metric);
    if !s2.is_finite() || s2 >= c * c {
        return Scalar::NAN;
    }
    (1.0 - s2 / (c * c)).sqrt()
}

fn sanitize(v: Vec3, c: Scalar) -> Vec3 {
    if !v.is_finite() {
        warn!("non-finite velocity operand replaced with zero");
        return Vec3::ZERO;
    }
    clamp_speed(v, JUST_BELOW_C * c)
}

/// Relativistic velocity composition.
///
/// Decomposes b into components parallel and perpendicular to a, scales the
/// perpendicular part by a's inverse gamma, and divides by 1 + a.b/c^2.
/// Zero operands short-circuit to the other operand, which also avoids the
/// 0/0 in the parallel projection. The result stays strictly below c for
/// valid inputs. Order matters in the non-collinear case; that asymmetry is
/// physical (Thomas rotation) and deliberate.
pub fn add_velocity(a: Vec3, b: Vec3, c: Scalar) -> Vec3 {
    let a = sanitize(a, c);
    let b = sanitize(b, c);
    if a.norm_sqr() < ZERO_EPSILON {
        return b;
    }
    if b.norm_sqr() < ZERO_EPSILON {
        return a;
    }
    let a_dot_b = a.dot(b);
    let denom = 1.0 + a_dot_b / (c * c);
    if denom.abs() < Scalar::EPSILON {
        // only reachable through float error on near-antiparallel near-c pairs
        return Vec3::ZERO;
    }
    let b_par = a * (a_dot_b / a.norm_sqr());
    let b_perp = b - b_par;
    (a + b_par + b_perp * inverse_gamma(a, c, None)) * (1.0 / denom)
}

/// Map an unbounded rapidity-like vector to a velocity strictly below c via
/// c * r / sqrt(c^2 + |r|^2), optionally weighting |r|^2 with the inverse of
/// a local metric. Integrating acceleration through this map can never push
/// a velocity past c.
pub fn rapidity_to_velocity(rapidity: Vec3, c: Scalar, metric: Option<&Metric>) -> Vec3 {
    if !rapidity.is_finite() {
        warn!("non-finite rapidity replaced with zero velocity");
        return Vec3::ZERO;
    }
    let r2 = match metric.and_then(|g| g.g.inverse()) {
        Some(inv) => -Metric { g: inv }.spatial_quadratic(rapidity),
        None => rapidity.norm_sqr(),
    };
    let r2 = if r2.is_finite() && r2 >= 0.0 { r2 } else { rapidity.norm_sqr() };
    rapidity * (c / (c * c + r2).sqrt())
}
