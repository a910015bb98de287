//! Fixed-Point 2D Vector
//!
//! Deterministic 2D vector operations for battle physics.
//! All operations use fixed-point arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

use super::fixed::{
    fixed_clamp, fixed_div, fixed_mul, fixed_sqrt, Fixed, EPSILON_SQ, FIXED_ONE, FIXED_SCALE,
};

/// 2D vector with fixed-point components.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FixedVec2 {
    /// X component (Q16.16 fixed-point)
    pub x: Fixed,
    /// Y component (Q16.16 fixed-point)
    pub y: Fixed,
}

impl FixedVec2 {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Unit vector pointing right (+X)
    pub const RIGHT: Self = Self { x: FIXED_ONE, y: 0 };

    /// Unit vector pointing up (+Y)
    pub const UP: Self = Self { x: 0, y: FIXED_ONE };

    /// Create a new vector from fixed-point components.
    #[inline]
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    /// Create a vector from integer components.
    #[inline]
    pub const fn from_ints(x: i32, y: i32) -> Self {
        Self {
            x: x << FIXED_SCALE,
            y: y << FIXED_SCALE,
        }
    }

    /// Add another vector.
    #[inline]
    pub fn add(self, other: Self) -> Self {
        Self {
            x: self.x.wrapping_add(other.x),
            y: self.y.wrapping_add(other.y),
        }
    }

    /// Subtract another vector.
    #[inline]
    pub fn sub(self, other: Self) -> Self {
        Self {
            x: self.x.wrapping_sub(other.x),
            y: self.y.wrapping_sub(other.y),
        }
    }

    /// Scale by a fixed-point scalar.
    #[inline]
    pub fn scale(self, scalar: Fixed) -> Self {
        Self {
            x: fixed_mul(self.x, scalar),
            y: fixed_mul(self.y, scalar),
        }
    }

    /// Divide by a fixed-point scalar.
    #[inline]
    pub fn div_scalar(self, scalar: Fixed) -> Self {
        Self {
            x: fixed_div(self.x, scalar),
            y: fixed_div(self.y, scalar),
        }
    }

    /// Squared length (avoids sqrt - prefer this for comparisons).
    #[inline]
    pub fn length_squared(self) -> Fixed {
        fixed_mul(self.x, self.x).wrapping_add(fixed_mul(self.y, self.y))
    }

    /// Length (magnitude). Prefer `length_squared` when possible.
    #[inline]
    pub fn length(self) -> Fixed {
        fixed_sqrt(self.length_squared())
    }

    /// Squared distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Self) -> Fixed {
        let dx = self.x.wrapping_sub(other.x);
        let dy = self.y.wrapping_sub(other.y);
        fixed_mul(dx, dx).wrapping_add(fixed_mul(dy, dy))
    }

    /// Distance to another point. Prefer `distance_squared` when possible.
    #[inline]
    pub fn distance(self, other: Self) -> Fixed {
        fixed_sqrt(self.distance_squared(other))
    }

    /// Normalize to unit length.
    ///
    /// A degenerate input (squared length at or below EPSILON_SQ) has
    /// no meaningful direction; the result is pinned to +X so both
    /// simulations resolve the ambiguity identically.
    #[inline]
    pub fn normalize(self) -> Self {
        if self.length_squared() <= EPSILON_SQ {
            return Self::RIGHT;
        }
        let len = self.length();
        if len == 0 {
            return Self::RIGHT;
        }
        self.div_scalar(len)
    }

    /// Dot product with another vector.
    #[inline]
    pub fn dot(self, other: Self) -> Fixed {
        fixed_mul(self.x, other.x).wrapping_add(fixed_mul(self.y, other.y))
    }

    /// Clamp both components into an axis-aligned box `[0, w] x [0, h]`.
    #[inline]
    pub fn clamp_to_field(self, width: Fixed, height: Fixed) -> Self {
        Self {
            x: fixed_clamp(self.x, 0, width),
            y: fixed_clamp(self.y, 0, height),
        }
    }

    /// Check if the point lies within `[0, w] x [0, h]`.
    #[inline]
    pub fn is_in_field(self, width: Fixed, height: Fixed) -> bool {
        self.x >= 0 && self.x <= width && self.y >= 0 && self.y <= height
    }

    /// Negate both components.
    #[inline]
    pub fn negate(self) -> Self {
        Self {
            x: self.x.wrapping_neg(),
            y: self.y.wrapping_neg(),
        }
    }

    /// Convert to float tuple for diagnostics.
    #[inline]
    pub fn to_floats(self) -> (f32, f32) {
        (
            self.x as f32 / FIXED_ONE as f32,
            self.y as f32 / FIXED_ONE as f32,
        )
    }
}

// Operator overloads for ergonomics
impl Add for FixedVec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.add(rhs)
    }
}

impl Sub for FixedVec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.sub(rhs)
    }
}

impl Neg for FixedVec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.negate()
    }
}

impl fmt::Debug for FixedVec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (fx, fy) = self.to_floats();
        write!(f, "Vec2({:.3}, {:.3})", fx, fy)
    }
}

impl fmt::Display for FixedVec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (fx, fy) = self.to_floats();
        write!(f, "({:.3}, {:.3})", fx, fy)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::to_fixed;

    #[test]
    fn test_vec2_add_sub() {
        let a = FixedVec2::new(to_fixed(3.0), to_fixed(4.0));
        let b = FixedVec2::new(to_fixed(1.0), to_fixed(2.0));
        assert_eq!((a + b).x, to_fixed(4.0));
        assert_eq!((a + b).y, to_fixed(6.0));
        assert_eq!((a - b).x, to_fixed(2.0));
        assert_eq!((a - b).y, to_fixed(2.0));
    }

    #[test]
    fn test_vec2_scale() {
        let v = FixedVec2::new(to_fixed(2.0), to_fixed(3.0));
        let result = v.scale(to_fixed(2.0));
        assert_eq!(result.x, to_fixed(4.0));
        assert_eq!(result.y, to_fixed(6.0));
    }

    #[test]
    fn test_vec2_length() {
        // 3-4-5 triangle
        let v = FixedVec2::new(to_fixed(3.0), to_fixed(4.0));
        assert_eq!(v.length_squared(), to_fixed(25.0));
        assert_eq!(v.length(), to_fixed(5.0));
    }

    #[test]
    fn test_vec2_distance() {
        let a = FixedVec2::new(to_fixed(0.0), to_fixed(0.0));
        let b = FixedVec2::new(to_fixed(3.0), to_fixed(4.0));
        assert_eq!(a.distance_squared(b), to_fixed(25.0));
    }

    #[test]
    fn test_vec2_normalize() {
        let v = FixedVec2::new(to_fixed(3.0), to_fixed(4.0));
        let norm = v.normalize();
        let len = norm.length();
        assert!(
            (len - FIXED_ONE).abs() < 200,
            "Normalized length should be ~1.0"
        );
    }

    #[test]
    fn test_vec2_normalize_degenerate() {
        // Zero and near-zero inputs pin to +X
        assert_eq!(FixedVec2::ZERO.normalize(), FixedVec2::RIGHT);
        let tiny = FixedVec2::new(1, 1);
        assert_eq!(tiny.normalize(), FixedVec2::RIGHT);
    }

    #[test]
    fn test_vec2_dot() {
        let a = FixedVec2::new(to_fixed(2.0), to_fixed(3.0));
        let b = FixedVec2::new(to_fixed(4.0), to_fixed(5.0));
        // 2*4 + 3*5 = 23
        assert_eq!(a.dot(b), to_fixed(23.0));
    }

    #[test]
    fn test_vec2_clamp_to_field() {
        let w = to_fixed(50.0);
        let h = to_fixed(15.0);

        let inside = FixedVec2::new(to_fixed(10.0), to_fixed(12.0));
        assert_eq!(inside.clamp_to_field(w, h), inside);

        let outside = FixedVec2::new(to_fixed(100.0), to_fixed(-4.0));
        let clamped = outside.clamp_to_field(w, h);
        assert_eq!(clamped.x, w);
        assert_eq!(clamped.y, 0);
        assert!(clamped.is_in_field(w, h));
    }

    #[test]
    fn test_vec2_determinism() {
        let a = FixedVec2::new(12345678, 87654321);
        let b = FixedVec2::new(11111111, 22222222);

        for _ in 0..1000 {
            assert_eq!(a + b, a + b);
            assert_eq!(a.length(), a.length());
            assert_eq!(a.normalize(), a.normalize());
        }
    }
}
