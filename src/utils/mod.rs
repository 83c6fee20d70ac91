//! Utility modules for blueprint scoring
//!
//! - Rounding: half-up integer rounding for totals and breakdown lines

pub mod rounding;

pub use rounding::round_half_up;
