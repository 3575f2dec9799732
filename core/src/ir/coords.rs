//! Plane vectors and the sign algebra
//!
//! Coordinates are screen-space (x right, y down), matching the canvas the
//! shapes come from. All ray-direction comparisons in the rule library go
//! through [`sign`]: a ray is a line's unit vector times a ±1 flag, and two
//! rays point the same way exactly when the sign of their dot product is +1.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Tolerance for sign and degeneracy decisions
pub const SIGN_EPS: f64 = 1e-9;

/// 2D vector / position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Dot product
    pub fn dot(&self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z-component of the 3D cross product (signed parallelogram area)
    pub fn cross_z(&self, other: Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.dot(*self).sqrt()
    }

    /// Distance to another position
    pub fn distance(&self, other: Vec2) -> f64 {
        (*self - other).norm()
    }

    /// Unit vector in the same direction
    ///
    /// Panics on a (near-)zero vector: a line or ray built from coincident
    /// points is a construction-order bug, not a recoverable state.
    pub fn unit(&self) -> Vec2 {
        let n = self.norm();
        assert!(n > SIGN_EPS, "cannot normalize a zero-length vector");
        Vec2::new(self.x / n, self.y / n)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Sign of a scalar under [`SIGN_EPS`]: +1, -1, or 0 for (near-)zero
pub fn sign(v: f64) -> i8 {
    if v > SIGN_EPS {
        1
    } else if v < -SIGN_EPS {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_and_cross() {
        let a = Vec2::new(1.0, 0.0);
        let b = Vec2::new(0.0, 1.0);

        assert_eq!(a.dot(b), 0.0);
        assert_eq!(a.cross_z(b), 1.0);
        assert_eq!(b.cross_z(a), -1.0);
    }

    #[test]
    fn test_unit() {
        let v = Vec2::new(3.0, 4.0);
        let u = v.unit();

        assert!((u.norm() - 1.0).abs() < 1e-12);
        assert!((u.x - 0.6).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "zero-length")]
    fn test_unit_of_zero_panics() {
        Vec2::new(0.0, 0.0).unit();
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(0.5), 1);
        assert_eq!(sign(-0.5), -1);
        assert_eq!(sign(1e-12), 0);
    }

    #[test]
    fn test_opposite_rays_have_negative_sign() {
        let e = Vec2::new(0.6, 0.8);
        assert_eq!(sign(e.dot(-e)), -1);
        assert_eq!(sign((e * 1.0).dot(e * 1.0)), 1);
    }
}
