use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::Scalar;

/// A spatial 3-vector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: Scalar,
    pub y: Scalar,
    pub z: Scalar,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: Scalar, y: Scalar, z: Scalar) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, other: Vec3) -> Scalar {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    #[inline]
    pub fn norm_sqr(self) -> Scalar {
        self.dot(self)
    }

    #[inline]
    pub fn norm(self) -> Scalar {
        self.norm_sqr().sqrt()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Unit vector in the same direction, or None for a (near-)zero or
    /// non-finite input.
    #[inline]
    pub fn normalized(self) -> Option<Vec3> {
        let n = self.norm();
        if n.is_finite() && n > 1e-12 {
            Some(self * (1.0 / n))
        } else {
            None
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec3) {
        *self = *self - rhs;
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<Scalar> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, s: Scalar) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }
}

/// A spacetime point or interval: three spatial components plus a temporal
/// component `t` in c·time units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FourVector {
    pub x: Scalar,
    pub y: Scalar,
    pub z: Scalar,
    pub t: Scalar,
}

impl FourVector {
    pub const ZERO: FourVector = FourVector { x: 0.0, y: 0.0, z: 0.0, t: 0.0 };

    #[inline]
    pub fn new(x: Scalar, y: Scalar, z: Scalar, t: Scalar) -> Self {
        Self { x, y, z, t }
    }

    #[inline]
    pub fn from_spatial(v: Vec3, t: Scalar) -> Self {
        Self { x: v.x, y: v.y, z: v.z, t }
    }

    #[inline]
    pub fn spatial(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Minkowski inner product, signature diag(-1,-1,-1,+1).
    #[inline]
    pub fn minkowski_dot(self, other: FourVector) -> Scalar {
        -self.x * other.x - self.y * other.y - self.z * other.z + self.t * other.t
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.t.is_finite()
    }

    #[inline]
    pub fn as_array(self) -> [Scalar; 4] {
        [self.x, self.y, self.z, self.t]
    }

    #[inline]
    pub fn from_array(a: [Scalar; 4]) -> Self {
        Self { x: a[0], y: a[1], z: a[2], t: a[3] }
    }
}

impl Add for FourVector {
    type Output = FourVector;
    #[inline]
    fn add(self, rhs: FourVector) -> FourVector {
        FourVector::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.t + rhs.t)
    }
}

impl Sub for FourVector {
    type Output = FourVector;
    #[inline]
    fn sub(self, rhs: FourVector) -> FourVector {
        FourVector::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.t - rhs.t)
    }
}

impl Mul<Scalar> for FourVector {
    type Output = FourVector;
    #[inline]
    fn mul(self, s: Scalar) -> FourVector {
        FourVector::new(self.x * s, self.y * s, self.z * s, self.t * s)
    }
}
