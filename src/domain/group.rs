//! SLIP39 group specifications

use std::str::FromStr;

use serde::Serialize;

use crate::error::ConfigError;

/// One group of a SLIP39 split: `threshold` of `count` member shares
///
/// Invariant: `1 <= threshold <= count <= 16`, and a group with more than
/// one member must require more than one share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupDescriptor {
    threshold: u8,
    count: u8,
}

impl GroupDescriptor {
    /// Maximum number of member shares in one group
    pub const MAX_COUNT: u8 = 16;

    /// The implicit group used when no `--group` is given
    pub const SINGLE: Self = Self {
        threshold: 1,
        count: 1,
    };

    /// Parses a `T-of-N` group specifier
    ///
    /// # Errors
    /// - [`ConfigError::UnparsableGroup`] if the string is not of the form `T-of-N`
    /// - [`ConfigError::GroupOutOfBounds`] unless `1 <= T <= N <= 16`
    /// - [`ConfigError::SingleShareGroup`] for `1-of-N` with `N > 1`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seedtool::domain::GroupDescriptor;
    ///
    /// let group = GroupDescriptor::parse("2-of-3").unwrap();
    /// assert_eq!(group.threshold(), 2);
    /// assert_eq!(group.count(), 3);
    ///
    /// assert!(GroupDescriptor::parse("1-of-1").is_ok());
    /// assert!(GroupDescriptor::parse("1-of-2").is_err());
    /// assert!(GroupDescriptor::parse("17-of-16").is_err());
    /// assert!(GroupDescriptor::parse("two of three").is_err());
    /// ```
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        let unparsable = || ConfigError::UnparsableGroup(spec.to_string());

        let (threshold, count) = spec.split_once("-of-").ok_or_else(unparsable)?;
        let threshold: i64 = threshold.parse().map_err(|_| unparsable())?;
        let count: i64 = count.parse().map_err(|_| unparsable())?;

        if !(1 <= threshold && threshold <= count && count <= i64::from(Self::MAX_COUNT)) {
            return Err(ConfigError::GroupOutOfBounds(spec.to_string()));
        }
        if count > 1 && threshold == 1 {
            return Err(ConfigError::SingleShareGroup(spec.to_string()));
        }

        let out_of_bounds = |_| ConfigError::GroupOutOfBounds(spec.to_string());
        Ok(Self {
            threshold: u8::try_from(threshold).map_err(out_of_bounds)?,
            count: u8::try_from(count).map_err(out_of_bounds)?,
        })
    }

    /// Number of member shares required to recover this group
    #[must_use]
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Number of member shares in this group
    #[must_use]
    pub fn count(&self) -> u8 {
        self.count
    }
}

impl FromStr for GroupDescriptor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for GroupDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-of-{}", self.threshold, self.count)
    }
}
