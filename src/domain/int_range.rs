//! Value range for the `ints` format

use serde::Serialize;

use crate::error::ConfigError;

/// Inclusive range of integers emitted by the `ints` format
///
/// Invariant: `low < high`, both within 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntRange {
    low: u8,
    high: u8,
}

impl IntRange {
    /// Creates a new range
    ///
    /// Takes wide integers so that negative or oversized user input reaches the
    /// range check instead of failing as a parse error.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidIntRange`] unless `0 <= low < high <= 255`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seedtool::domain::IntRange;
    ///
    /// let range = IntRange::new(0, 255).unwrap();
    /// assert_eq!((range.low(), range.high()), (0, 255));
    ///
    /// assert!(IntRange::new(5, 5).is_err());
    /// assert!(IntRange::new(10, 5).is_err());
    /// assert!(IntRange::new(0, 256).is_err());
    /// ```
    pub fn new(low: i64, high: i64) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidIntRange { low, high };
        if !(0 <= low && low < high && high <= 255) {
            return Err(invalid());
        }
        Ok(Self {
            low: u8::try_from(low).map_err(|_| invalid())?,
            high: u8::try_from(high).map_err(|_| invalid())?,
        })
    }

    #[must_use]
    pub fn low(&self) -> u8 {
        self.low
    }

    #[must_use]
    pub fn high(&self) -> u8 {
        self.high
    }

    /// Number of distinct values in the range
    #[must_use]
    pub fn span(&self) -> u16 {
        u16::from(self.high) - u16::from(self.low) + 1
    }
}

impl Default for IntRange {
    fn default() -> Self {
        Self { low: 1, high: 9 }
    }
}
