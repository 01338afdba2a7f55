//! `Count` newtype for the number of output units

use crate::error::ConfigError;

/// Number of output units to produce (1..=64)
///
/// For byte-oriented formats this is the seed length in bytes; for unit
/// formats such as dice or bits it is the number of rolls or bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Count(u8);

impl Count {
    /// Minimum valid count
    pub const MIN: u8 = 1;

    /// Maximum valid count
    pub const MAX: u8 = 64;

    /// Count used when `--count` is not given
    pub const DEFAULT: Self = Self(16);

    /// Creates a new count
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidCount`] if the value is outside 1..=64
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seedtool::domain::Count;
    ///
    /// let count = Count::new(32).unwrap();
    /// assert_eq!(*count, 32);
    ///
    /// assert!(Count::new(0).is_err());
    /// assert!(Count::new(65).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self, ConfigError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ConfigError::InvalidCount {
                value: value.to_string(),
            });
        }
        Ok(Self(value))
    }

    /// Parses a raw `--count` value
    ///
    /// Non-numeric input is reported with the same range error as an
    /// out-of-range number.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidCount`] if the string is not an integer in 1..=64
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seedtool::domain::Count;
    ///
    /// assert_eq!(*Count::parse("24").unwrap(), 24);
    /// assert!(Count::parse("sixteen").is_err());
    /// assert!(Count::parse("-1").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidCount {
            value: raw.to_string(),
        };
        let value: i64 = raw.parse().map_err(|_| invalid())?;
        let value = u8::try_from(value).map_err(|_| invalid())?;
        Self::new(value).map_err(|_| invalid())
    }
}

impl Default for Count {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::ops::Deref for Count {
    type Target = u8;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_bounds() {
        assert!(Count::new(0).is_err());
        assert_eq!(*Count::new(1).unwrap(), 1);
        assert_eq!(*Count::new(64).unwrap(), 64);
        assert!(Count::new(65).is_err());
    }

    #[test]
    fn test_count_parse_rejects_garbage() {
        for raw in ["", "abc", "12abc", "1.5", "300", "99999999999999999999"] {
            let err = Count::parse(raw).unwrap_err();
            assert_eq!(err.to_string(), "COUNT must be in [1-64].", "input {raw:?}");
        }
    }

    #[test]
    fn test_count_default_is_16() {
        assert_eq!(*Count::default(), 16);
    }
}
