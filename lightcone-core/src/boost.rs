use log::warn;

use crate::{Matrix4, Scalar, Vec3};

/// Beta-squared below this is treated as exactly at rest.
const BOOST_EPSILON: Scalar = 1e-24;

/// Build the 4x4 Lorentz boost for a velocity given as a fraction of c.
///
/// Spatial block delta_ij + (gamma - 1) n_i n_j, time cross terms
/// -gamma beta_i, corner gamma. Returns the identity below epsilon, so
/// `lorentz_boost(Vec3::ZERO)` is exactly the identity, and
/// `lorentz_boost(-v)` is the structural inverse of `lorentz_boost(v)`.
pub fn lorentz_boost(velocity_over_c: Vec3) -> Matrix4 {
    if !velocity_over_c.is_finite() {
        warn!("non-finite boost velocity; substituting identity");
        return Matrix4::IDENTITY;
    }
    let beta_sqr = velocity_over_c.norm_sqr();
    if beta_sqr < BOOST_EPSILON {
        return Matrix4::IDENTITY;
    }
    // keep strictly below the light-speed singularity
    let beta_sqr = beta_sqr.min(1.0 - 1e-12);
    let beta = beta_sqr.sqrt();
    let gamma = 1.0 / (1.0 - beta_sqr).sqrt();
    let n = match velocity_over_c.normalized() {
        Some(n) => n,
        None => return Matrix4::IDENTITY,
    };

    let nv = [n.x, n.y, n.z];
    let mut m = Matrix4::IDENTITY.m;
    for i in 0..3 {
        for j in 0..3 {
            let kronecker = if i == j { 1.0 } else { 0.0 };
            m[i][j] = kronecker + (gamma - 1.0) * nv[i] * nv[j];
        }
        m[i][3] = -gamma * beta * nv[i];
        m[3][i] = -gamma * beta * nv[i];
    }
    m[3][3] = gamma;
    Matrix4 { m }
}
