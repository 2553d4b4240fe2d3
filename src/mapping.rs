//! Mixed-radix encoding of bag assignments.
//!
//! A mapping of the vertices of a bag `(b_0, .., b_{k-1})` to target vertices
//! `(t_0, .., t_{k-1})` is stored as the single integer
//! `t_0 + t_1 * n + .. + t_{k-1} * n^(k-1)` with `n = |V(H)|`. Position `p` of
//! the bag is digit `p` of the number.
//!
//! All functions expect `base >= 1`, `position` within the bag and `mapping`
//! below `base^bag_size`; these are checked in debug builds only.

use std::convert::TryFrom;

/// `base^exp`, `None` on `usize` overflow.
#[inline]
pub fn checked_power(base: usize, exp: usize) -> Option<usize> {
    let exp = u32::try_from(exp).ok()?;
    base.checked_pow(exp)
}

#[inline]
pub(crate) fn power(base: usize, exp: usize) -> usize {
    base.pow(exp as u32)
}

/// The target vertex stored at `position`.
#[inline]
pub fn extract(mapping: usize, position: usize, base: usize) -> usize {
    debug_assert!(base >= 1);
    mapping / power(base, position) % base
}

/// Shifts every digit at or above `position` one place up and puts `value` at
/// `position`.
#[inline]
pub fn insert(value: usize, mapping: usize, position: usize, base: usize) -> usize {
    debug_assert!(base >= 1);
    debug_assert!(value < base);
    let step = power(base, position);
    let right_digits = mapping % step;
    let left_digits = mapping - right_digits;
    base * left_digits + step * value + right_digits
}

/// Drops the digit at `position`, shifting higher digits down. Inverse of
/// [`insert`].
#[inline]
pub fn remove(mapping: usize, position: usize, base: usize) -> usize {
    debug_assert!(base >= 1);
    let step = power(base, position);
    let left_digits = mapping - mapping % (step * base);
    let right_digits = mapping % step;
    left_digits / base + right_digits
}

/// Encodes `digits` (position 0 first).
pub fn encode(digits: &[usize], base: usize) -> usize {
    digits.iter().rev().fold(0, |acc, digit| {
        debug_assert!(*digit < base);
        acc * base + digit
    })
}

/// Decodes the `bag_size` digits of `mapping` (position 0 first).
pub fn decode(mapping: usize, bag_size: usize, base: usize) -> Vec<usize> {
    (0..bag_size)
        .map(|position| extract(mapping, position, base))
        .collect()
}
