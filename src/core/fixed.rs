//! Q16.16 Fixed-Point Arithmetic
//!
//! Deterministic fixed-point math for the battle simulation.
//! All operations use integer arithmetic only - no floats in any
//! state that influences the chain hash.
//!
//! ## Format: Q16.16
//!
//! A 32-bit signed integer whose interpreted value is `raw / 65536`:
//! 1 sign bit, 15 integer bits, 16 fractional bits.
//! Range ~±32768.0, precision 1/65536.
//!
//! Multiplication widens to i64 and shifts back; division pre-shifts
//! the numerator. Both truncate toward zero exactly like the verifier
//! re-run must, so the same inputs yield the same bytes on every host.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Q16.16 fixed-point number stored as i32.
/// 16 bits integer, 16 bits fractional.
pub type Fixed = i32;

/// Number of fractional bits (16)
pub const FIXED_SCALE: i32 = 16;

/// 1.0 in fixed-point (65536)
pub const FIXED_ONE: Fixed = 1 << FIXED_SCALE;

/// 0.5 in fixed-point (32768)
pub const FIXED_HALF: Fixed = FIXED_ONE >> 1;

// =============================================================================
// SIMULATION CONSTANTS (All as integer literals - NO float conversion!)
// =============================================================================

/// Degenerate-length threshold: 0.01 = 655
pub const EPSILON: Fixed = 655;

/// EPSILON squared in Q16.16 (0.0001, truncated)
pub const EPSILON_SQ: Fixed = 6;

/// Fortress exclusion disc radius: 3.0 * 65536
pub const FORTRESS_EXCLUSION_RADIUS: Fixed = 196608;

/// Exclusion radius squared: 9.0 * 65536
pub const FORTRESS_EXCLUSION_RADIUS_SQ: Fixed = 589824;

/// Distance at which a hero switches to attacking the enemy fortress: 4.0
pub const FORTRESS_ATTACK_DISTANCE: Fixed = 262144;

/// FORTRESS_ATTACK_DISTANCE squared: 16.0
pub const FORTRESS_ATTACK_DISTANCE_SQ: Fixed = 1048576;

/// Fortress targeting range against heroes: 15.0
pub const FORTRESS_ATTACK_RANGE: Fixed = 983040;

/// FORTRESS_ATTACK_RANGE squared: 225.0
pub const FORTRESS_ATTACK_RANGE_SQ: Fixed = 14745600;

/// Fraction of attack range a hero tries to hold against a hero target: 0.8
pub const HERO_PREFERRED_COMBAT_DISTANCE_RATIO: Fixed = 52428;

/// Per-tick velocity damping: 0.95
pub const FRICTION: Fixed = 62259;

/// Hard cap on hero speed: 0.5 units/tick
pub const HERO_MAX_SPEED: Fixed = 32768;

/// Projectile travel per tick: 1.2 units
pub const PROJECTILE_SPEED: Fixed = 78643;

/// Hit radius used against a dead target's last position: 0.1
pub const PROJECTILE_LAST_POSITION_HIT_RADIUS: Fixed = 6554;

/// Fortress hit circle radius: 1.0
pub const FORTRESS_HIT_RADIUS: Fixed = 65536;

/// Padding added to a hero's collision radius for projectile hits: 0.1
pub const HERO_HIT_RADIUS_PAD: Fixed = 6554;

// =============================================================================
// CORE OPERATIONS (All deterministic, wrapping semantics)
// =============================================================================

/// Convert a compile-time float to fixed-point.
///
/// # Warning
/// Only use at compile-time or initialization. NEVER in the tick loop.
#[inline]
pub const fn to_fixed(f: f64) -> Fixed {
    (f * (FIXED_ONE as f64)) as Fixed
}

/// Convert fixed-point to float for display/diagnostics.
///
/// # Warning
/// Only for logs and debug output. The result must never feed back
/// into simulation state.
#[inline]
pub fn to_float(f: Fixed) -> f32 {
    f as f32 / FIXED_ONE as f32
}

/// Convert an integer to fixed-point.
#[inline]
pub const fn int_to_fixed(i: i32) -> Fixed {
    i << FIXED_SCALE
}

/// Truncate fixed-point to its integer part (floor for non-negative values).
#[inline]
pub const fn fixed_to_int(x: Fixed) -> i32 {
    x >> FIXED_SCALE
}

/// Multiply two fixed-point numbers.
///
/// Widens to i64, multiplies, arithmetic-shifts right by 16.
#[inline]
pub fn fixed_mul(a: Fixed, b: Fixed) -> Fixed {
    let wide = (a as i64) * (b as i64);
    (wide >> FIXED_SCALE) as Fixed
}

/// Divide two fixed-point numbers.
///
/// Pre-shifts the numerator into i64 to keep precision; the integer
/// division truncates toward zero. Divide-by-zero returns 0 (not panic).
#[inline]
pub fn fixed_div(a: Fixed, b: Fixed) -> Fixed {
    if b == 0 {
        return 0;
    }
    let wide = (a as i64) << FIXED_SCALE;
    (wide / b as i64) as Fixed
}

/// Square root of a Q16.16 value.
///
/// Integer Newton iteration on `x << 16`, run until the estimate is
/// stable. No float, no platform-dependent rounding. Returns 0 for
/// non-positive inputs.
///
/// Prefer squared distances over this where a comparison suffices.
#[inline]
pub fn fixed_sqrt(x: Fixed) -> Fixed {
    if x <= 0 {
        return 0;
    }
    // sqrt(raw / 2^16) * 2^16 == isqrt(raw << 16)
    let n = (x as u64) << FIXED_SCALE;
    let mut guess = n;
    let mut next = (guess + 1) >> 1;
    while next < guess {
        guess = next;
        next = (guess + n / guess) >> 1;
    }
    guess as Fixed
}

/// Scale a plain integer by a Q16.16 multiplier, truncating toward
/// zero. Safe for values whose scaled magnitude exceeds the Q16.16
/// integer range (HP pools, damage totals).
#[inline]
pub fn fixed_scale_int(value: i32, mult: Fixed) -> i32 {
    ((value as i64 * mult as i64) >> FIXED_SCALE) as i32
}

/// Absolute value of a fixed-point number.
#[inline]
pub fn fixed_abs(x: Fixed) -> Fixed {
    if x < 0 {
        x.wrapping_neg()
    } else {
        x
    }
}

/// Minimum of two fixed-point numbers.
#[inline]
pub fn fixed_min(a: Fixed, b: Fixed) -> Fixed {
    if a < b {
        a
    } else {
        b
    }
}

/// Maximum of two fixed-point numbers.
#[inline]
pub fn fixed_max(a: Fixed, b: Fixed) -> Fixed {
    if a > b {
        a
    } else {
        b
    }
}

/// Clamp a fixed-point number to a range.
#[inline]
pub fn fixed_clamp(value: Fixed, min: Fixed, max: Fixed) -> Fixed {
    fixed_max(min, fixed_min(max, value))
}

// =============================================================================
// FIXEDNUM WRAPPER (Optional ergonomic wrapper)
// =============================================================================

/// Ergonomic wrapper around fixed-point with operator overloading.
///
/// For hot paths, use raw `Fixed` with the `fixed_*` functions.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FixedNum(pub Fixed);

impl FixedNum {
    /// Zero constant
    pub const ZERO: Self = Self(0);

    /// One constant
    pub const ONE: Self = Self(FIXED_ONE);

    /// Create from raw fixed-point value
    #[inline]
    pub const fn from_raw(raw: Fixed) -> Self {
        Self(raw)
    }

    /// Create from integer
    #[inline]
    pub const fn from_int(i: i32) -> Self {
        Self(i << FIXED_SCALE)
    }

    /// Get raw fixed-point value
    #[inline]
    pub const fn raw(self) -> Fixed {
        self.0
    }

    /// Convert to float for display
    #[inline]
    pub fn to_float(self) -> f32 {
        to_float(self.0)
    }

    /// Absolute value
    #[inline]
    pub fn abs(self) -> Self {
        Self(fixed_abs(self.0))
    }

    /// Square root
    #[inline]
    pub fn sqrt(self) -> Self {
        Self(fixed_sqrt(self.0))
    }
}

impl Add for FixedNum {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for FixedNum {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.wrapping_sub(rhs.0))
    }
}

impl Mul for FixedNum {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self(fixed_mul(self.0, rhs.0))
    }
}

impl Div for FixedNum {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        Self(fixed_div(self.0, rhs.0))
    }
}

impl Neg for FixedNum {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self(self.0.wrapping_neg())
    }
}

impl fmt::Debug for FixedNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed({:.4})", self.to_float())
    }
}

impl fmt::Display for FixedNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.to_float())
    }
}

// =============================================================================
// TESTS
// =============================================================================
