//! The closed set of seed encodings and their per-format parameters

use serde::Serialize;

use super::{GroupDescriptor, IntRange};
use crate::error::ConfigError;

/// Input format name that defers format selection to a decoded UR's type
pub const UR_INPUT: &str = "ur";

/// Resource type carrying a raw seed
pub const CRYPTO_SEED: &str = "crypto-seed";
/// Resource type carrying a BIP39 seed
pub const CRYPTO_BIP39: &str = "crypto-bip39";
/// Resource type carrying a SLIP39 seed
pub const CRYPTO_SLIP39: &str = "crypto-slip39";

/// A seed encoding, with the parameters that only that encoding uses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Format {
    Random,
    Hex,
    Bits,
    Cards,
    Dice,
    Base6,
    Base10,
    Ints(IntRange),
    Bip39,
    Slip39(Slip39Groups),
    Bc32,
}

impl Format {
    /// Looks up a format by its command-line name
    ///
    /// Parameterised formats start out with their defaults.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seedtool::domain::Format;
    ///
    /// assert_eq!(Format::from_name("hex"), Some(Format::Hex));
    /// assert_eq!(Format::from_name("dice").unwrap().name(), "dice");
    /// assert_eq!(Format::from_name("HEX"), None);
    /// assert_eq!(Format::from_name("ur"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let format = match name {
            "random" => Self::Random,
            "hex" => Self::Hex,
            "bits" => Self::Bits,
            "cards" => Self::Cards,
            "dice" => Self::Dice,
            "base6" => Self::Base6,
            "base10" => Self::Base10,
            "ints" => Self::Ints(IntRange::default()),
            "bip39" => Self::Bip39,
            "slip39" => Self::Slip39(Slip39Groups::default()),
            "bc32" => Self::Bc32,
            _ => return None,
        };
        Some(format)
    }

    /// Maps a UR type to the format its payload is interpreted as
    #[must_use]
    pub fn from_resource_type(ur_type: &str) -> Option<Self> {
        match ur_type {
            CRYPTO_SEED => Some(Self::Hex),
            CRYPTO_BIP39 => Some(Self::Bip39),
            CRYPTO_SLIP39 => Some(Self::Slip39(Slip39Groups::default())),
            _ => None,
        }
    }

    /// UR type used when this format's output is wrapped with `--ur`
    #[must_use]
    pub fn resource_type(&self) -> Option<&'static str> {
        match self {
            Self::Hex => Some(CRYPTO_SEED),
            Self::Bip39 => Some(CRYPTO_BIP39),
            Self::Slip39(_) => Some(CRYPTO_SLIP39),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Hex => "hex",
            Self::Bits => "bits",
            Self::Cards => "cards",
            Self::Dice => "dice",
            Self::Base6 => "base6",
            Self::Base10 => "base10",
            Self::Ints(_) => "ints",
            Self::Bip39 => "bip39",
            Self::Slip39(_) => "slip39",
            Self::Bc32 => "bc32",
        }
    }

    #[must_use]
    pub fn is_random(&self) -> bool {
        matches!(self, Self::Random)
    }

    #[must_use]
    pub fn is_hex(&self) -> bool {
        matches!(self, Self::Hex)
    }

    #[must_use]
    pub fn is_bc32(&self) -> bool {
        matches!(self, Self::Bc32)
    }

    #[must_use]
    pub fn is_bip39(&self) -> bool {
        matches!(self, Self::Bip39)
    }

    #[must_use]
    pub fn is_slip39(&self) -> bool {
        matches!(self, Self::Slip39(_))
    }

    /// Formats that carry arbitrary bytes and can feed or accept any other format
    #[must_use]
    pub fn is_universal(&self) -> bool {
        self.is_hex() || self.is_bc32()
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// BIP39 seeds are 12 to 32 bytes, in steps of two
#[must_use]
pub fn is_bip39_seed_length_valid(count: u8) -> bool {
    (12..=32).contains(&count) && count % 2 == 0
}

/// SLIP39 master secrets are 16 to 32 bytes, in steps of two
#[must_use]
pub fn is_slip39_seed_length_valid(count: u8) -> bool {
    (16..=32).contains(&count) && count % 2 == 0
}

/// Group layout of a SLIP39 split
///
/// Invariant: between 1 and [`Slip39Groups::MAX_GROUPS`] groups, and
/// `1 <= threshold <= groups.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slip39Groups {
    groups: Vec<GroupDescriptor>,
    threshold: u8,
}

impl Slip39Groups {
    /// Maximum number of `--group` specifiers
    pub const MAX_GROUPS: usize = 16;

    /// Creates a group layout
    ///
    /// # Errors
    /// - [`ConfigError::TooManyGroups`] if more than 16 groups are given
    /// - [`ConfigError::InvalidGroupsThreshold`] unless `1 <= threshold <= groups.len()`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seedtool::domain::{GroupDescriptor, Slip39Groups};
    ///
    /// let groups: Vec<GroupDescriptor> = ["2-of-3", "3-of-5", "1-of-1"]
    ///     .iter()
    ///     .map(|s| s.parse().unwrap())
    ///     .collect();
    ///
    /// assert!(Slip39Groups::new(groups.clone(), 3).is_ok());
    /// assert!(Slip39Groups::new(groups.clone(), 4).is_err());
    /// assert!(Slip39Groups::new(groups, 0).is_err());
    /// ```
    pub fn new(groups: Vec<GroupDescriptor>, threshold: i64) -> Result<Self, ConfigError> {
        if groups.len() > Self::MAX_GROUPS {
            return Err(ConfigError::TooManyGroups {
                given: groups.len(),
                max: Self::MAX_GROUPS,
            });
        }
        let invalid = || ConfigError::InvalidGroupsThreshold {
            threshold,
            groups: groups.len(),
        };
        let in_range = usize::try_from(threshold).is_ok_and(|t| 1 <= t && t <= groups.len());
        if !in_range {
            return Err(invalid());
        }
        let threshold = u8::try_from(threshold).map_err(|_| invalid())?;
        Ok(Self { groups, threshold })
    }

    #[must_use]
    pub fn groups(&self) -> &[GroupDescriptor] {
        &self.groups
    }

    /// Number of groups that must each meet their own threshold
    #[must_use]
    pub fn threshold(&self) -> u8 {
        self.threshold
    }
}

impl Default for Slip39Groups {
    fn default() -> Self {
        Self {
            groups: vec![GroupDescriptor::SINGLE],
            threshold: 1,
        }
    }
}
