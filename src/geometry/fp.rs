//! Floating point tolerance policy
//!
//! Every geometric predicate in the crate compares values through the
//! functions in this module. They share one global threshold: two values
//! compare equal iff `|a - b| <= threshold`.
//!
//! The threshold can be changed at runtime with [`set_global_threshold`].
//! Doing so invalidates any hash keys computed with [`fp_hash_key`] before the
//! change, and changes the outcome of every predicate (point equality,
//! winding detection, convexity checks) from then on.
//!
//! # Hash keys
//!
//! Threshold-based equality is not transitive, so no hash function can be
//! consistent with it: two values within the threshold of each other can
//! always round to different keys. [`fp_hash_key`] is provided for callers
//! that understand this; position lookups use
//! [`crate::geometry::PointLookup`], which probes neighboring keys to close
//! the gap.

use std::sync::atomic::{AtomicU64, Ordering};

/// Default threshold for equality of two floating point values
pub const DEFAULT_THRESHOLD: f64 = 1e-7;

// Bit pattern of DEFAULT_THRESHOLD.
static GLOBAL_THRESHOLD_BITS: AtomicU64 = AtomicU64::new(0x3e7a_d7f2_9abc_af48);

/// Current global comparison threshold
#[inline]
pub fn global_threshold() -> f64 {
    f64::from_bits(GLOBAL_THRESHOLD_BITS.load(Ordering::Relaxed))
}

/// Replace the global comparison threshold
///
/// Negative values are stored as their absolute value.
pub fn set_global_threshold(threshold: f64) {
    GLOBAL_THRESHOLD_BITS.store(threshold.abs().to_bits(), Ordering::Relaxed);
}

/// Rounds a value to the grid defined by the global threshold
///
/// See the module docs for why equal values may still produce different keys.
#[inline]
pub fn fp_hash_key(value: f64) -> i64 {
    (value / global_threshold()).round() as i64
}

/// Rounds a value to the grid defined by a given threshold
#[inline]
pub fn fp_hash_key_with(value: f64, threshold: f64) -> i64 {
    (value / threshold).round() as i64
}

// The global variants below read the threshold directly instead of
// forwarding to the `_with` variants. They are the hottest functions in the
// crate.

/// `|a - b| <= threshold`
#[inline]
pub fn fp_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= global_threshold()
}

/// `fp_equal` with an explicit threshold
#[inline]
pub fn fp_equal_with(a: f64, b: f64, threshold: f64) -> bool {
    (a - b).abs() <= threshold
}

/// `a` is smaller than `b` by more than the threshold
#[inline]
pub fn fp_less(a: f64, b: f64) -> bool {
    a - b < -global_threshold()
}

/// `fp_less` with an explicit threshold
#[inline]
pub fn fp_less_with(a: f64, b: f64, threshold: f64) -> bool {
    a - b < -threshold
}

/// `a` is smaller than `b` or within the threshold of it
#[inline]
pub fn fp_less_equal(a: f64, b: f64) -> bool {
    a - b <= global_threshold()
}

/// `fp_less_equal` with an explicit threshold
#[inline]
pub fn fp_less_equal_with(a: f64, b: f64, threshold: f64) -> bool {
    a - b <= threshold
}

/// `a` is larger than `b` by more than the threshold
#[inline]
pub fn fp_greater(a: f64, b: f64) -> bool {
    a - b > global_threshold()
}

/// `fp_greater` with an explicit threshold
#[inline]
pub fn fp_greater_with(a: f64, b: f64, threshold: f64) -> bool {
    a - b > threshold
}

/// `a` is larger than `b` or within the threshold of it
#[inline]
pub fn fp_greater_equal(a: f64, b: f64) -> bool {
    a - b >= -global_threshold()
}

/// `fp_greater_equal` with an explicit threshold
#[inline]
pub fn fp_greater_equal_with(a: f64, b: f64, threshold: f64) -> bool {
    a - b >= -threshold
}

/// Sign of a value with respect to the global threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Positive,
    Negative,
    /// Within the threshold of zero
    Zero,
}

/// Classify a value as positive, negative or zero
#[inline]
pub fn sign(value: f64) -> Sign {
    if fp_greater(value, 0.0) {
        Sign::Positive
    } else if fp_less(value, 0.0) {
        Sign::Negative
    } else {
        Sign::Zero
    }
}

/// Next index in a cyclic range of `len` elements
#[inline]
pub fn cyclic_next(idx: usize, len: usize) -> usize {
    if idx + 1 < len {
        idx + 1
    } else {
        0
    }
}

/// Previous index in a cyclic range of `len` elements
#[inline]
pub fn cyclic_prev(idx: usize, len: usize) -> usize {
    if idx == 0 {
        len.saturating_sub(1)
    } else {
        idx - 1
    }
}

/// Limit a value to a range; the bounds may be given in either order
pub fn clamp_to_range(value: f64, a: f64, b: f64) -> f64 {
    let (min, max) = if a <= b { (a, b) } else { (b, a) };
    value.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_bits() {
        assert_eq!(DEFAULT_THRESHOLD.to_bits(), 0x3e7a_d7f2_9abc_af48);
    }

    #[test]
    fn test_comparisons() {
        assert!(fp_equal(1.0, 1.0 + 5e-8));
        assert!(!fp_equal(1.0, 1.0 + 1e-6));

        assert!(fp_less(1.0, 1.1));
        assert!(!fp_less(1.0, 1.0 + 5e-8));

        assert!(fp_less_equal(1.0 + 5e-8, 1.0));
        assert!(!fp_less_equal(1.1, 1.0));

        assert!(fp_greater(1.1, 1.0));
        assert!(!fp_greater(1.0 + 5e-8, 1.0));

        assert!(fp_greater_equal(1.0, 1.0 + 5e-8));
        assert!(!fp_greater_equal(1.0, 1.1));
    }

    #[test]
    fn test_explicit_threshold() {
        assert!(fp_equal_with(1.0, 1.05, 0.1));
        assert!(!fp_less_with(1.0, 1.05, 0.1));
        assert!(fp_less_equal_with(1.05, 1.0, 0.1));
        assert!(!fp_greater_with(1.05, 1.0, 0.1));
        assert!(fp_greater_equal_with(1.0, 1.05, 0.1));
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(1.0), Sign::Positive);
        assert_eq!(sign(-1.0), Sign::Negative);
        assert_eq!(sign(1e-9), Sign::Zero);
    }

    #[test]
    fn test_cyclic_indices() {
        assert_eq!(cyclic_next(0, 3), 1);
        assert_eq!(cyclic_next(2, 3), 0);
        assert_eq!(cyclic_prev(0, 3), 2);
        assert_eq!(cyclic_prev(1, 3), 0);
    }

    #[test]
    fn test_clamp_to_range() {
        assert_eq!(clamp_to_range(5.0, 1.0, 0.0), 1.0);
        assert_eq!(clamp_to_range(-5.0, -1.0, 1.0), -1.0);
        assert_eq!(clamp_to_range(0.5, -1.0, 1.0), 0.5);
    }

    #[test]
    fn test_hash_key_with() {
        assert_eq!(fp_hash_key_with(1.04, 0.1), 10);
        assert_eq!(fp_hash_key_with(-1.04, 0.1), -10);
    }
}
