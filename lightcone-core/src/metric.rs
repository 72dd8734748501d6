use crate::{FourVector, Matrix4, Scalar, Vec3};

/// A 4x4 local metric tensor g_{mu nu}, signature diag(-1,-1,-1,+1) with the
/// temporal slot last.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metric {
    pub g: Matrix4,
}

impl Metric {
    /// Flat Minkowski metric.
    pub fn minkowski() -> Self {
        Metric {
            g: Matrix4 {
                m: [
                    [-1.0, 0.0, 0.0, 0.0],
                    [0.0, -1.0, 0.0, 0.0],
                    [0.0, 0.0, -1.0, 0.0],
                    [0.0, 0.0, 0.0, 1.0],
                ],
            },
        }
    }

    /// Metric-weighted inner product g_{mu nu} a^mu b^nu.
    #[inline]
    pub fn dot(&self, a: FourVector, b: FourVector) -> Scalar {
        let av = a.as_array();
        let bv = b.as_array();
        let mut sum = 0.0;
        for (mu, row) in self.g.m.iter().enumerate() {
            for (nu, g) in row.iter().enumerate() {
                sum += g * av[mu] * bv[nu];
            }
        }
        sum
    }

    /// Quadratic form of the spatial block only. Negative-definite for
    /// Minkowski-like metrics; callers negate to recover a squared magnitude.
    #[inline]
    pub fn spatial_quadratic(&self, v: Vec3) -> Scalar {
        let a = [v.x, v.y, v.z];
        let mut sum = 0.0;
        for (i, ai) in a.iter().enumerate() {
            for (j, aj) in a.iter().enumerate() {
                sum += self.g.m[i][j] * ai * aj;
            }
        }
        sum
    }

    /// Congruence transform L^T g L, expressing the metric for use with
    /// vectors boosted by L.
    #[inline]
    pub fn boosted(&self, l: &Matrix4) -> Metric {
        Metric { g: l.transpose() * self.g * *l }
    }
}
