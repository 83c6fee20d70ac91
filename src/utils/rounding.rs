//! Rounding helpers for score totals and breakdown lines

/// Round to the nearest integer, halves toward positive infinity
///
/// `2.5 → 3`, `-2.5 → -2`. This is the rounding used for score totals and
/// breakdown values (not Rust's `f64::round`, which rounds halves away from zero).
pub fn round_half_up(value: f64) -> i64 {
    libm::floor(value + 0.5) as i64
}
