//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100);

    /// Creates a new Percentage, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Rounds `part / whole` to the nearest whole percent.
    ///
    /// A zero `whole` yields zero; `part` above `whole` clamps to 100.
    pub fn from_ratio(part: u32, whole: u32) -> Self {
        if whole == 0 {
            return Self::ZERO;
        }
        let pct = (f64::from(part) * 100.0 / f64::from(whole)).round();
        Self::new(pct.min(100.0) as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_new_clamps_to_100() {
        assert_eq!(Percentage::new(101).value(), 100);
        assert_eq!(Percentage::new(255).value(), 100);
    }

    #[test]
    fn from_ratio_rounds_to_nearest() {
        assert_eq!(Percentage::from_ratio(1, 5).value(), 20);
        assert_eq!(Percentage::from_ratio(4, 5).value(), 80);
        assert_eq!(Percentage::from_ratio(1, 3).value(), 33);
        assert_eq!(Percentage::from_ratio(2, 3).value(), 67);
        assert_eq!(Percentage::from_ratio(1, 8).value(), 13);
    }

    #[test]
    fn from_ratio_with_zero_whole_is_zero() {
        assert_eq!(Percentage::from_ratio(0, 0), Percentage::ZERO);
        assert_eq!(Percentage::from_ratio(3, 0), Percentage::ZERO);
    }

    #[test]
    fn from_ratio_clamps_overflow() {
        assert_eq!(Percentage::from_ratio(7, 5), Percentage::HUNDRED);
    }

    #[test]
    fn percentage_displays_correctly() {
        assert_eq!(format!("{}", Percentage::new(75)), "75%");
        assert_eq!(format!("{}", Percentage::ZERO), "0%");
    }

    #[test]
    fn percentage_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Percentage::new(42)).unwrap(), "42");
        let pct: Percentage = serde_json::from_str("75").unwrap();
        assert_eq!(pct.value(), 75);
    }
}
