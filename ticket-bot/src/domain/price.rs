//! Fare amounts.

use std::fmt;

/// A fare in minor currency units (the provider quotes whole UZS).
///
/// Displayed with space-separated thousands groups:
///
/// ```
/// use ticket_bot::domain::Price;
///
/// assert_eq!(Price::new(545_000).to_string(), "545 000");
/// assert_eq!(Price::new(999).to_string(), "999");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(u64);

impl Price {
    /// Create a price from minor units.
    pub const fn new(minor_units: u64) -> Self {
        Self(minor_units)
    }

    /// The amount in minor units.
    pub const fn minor_units(self) -> u64 {
        self.0
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let len = digits.len();
        for (i, digit) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                f.write_str(" ")?;
            }
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}
