//! BC32 text: Bech32 characters without a human-readable part
//!
//! The data is regrouped into 5-bit values, written in the Bech32 alphabet and
//! followed by a 6-character checksum. The checksum is the Bech32m one,
//! computed as if the human-readable part were empty.
//!
//! # Examples
//!
//! ```rust
//! use seedtool::bc32;
//!
//! assert_eq!(bc32::encode(&[0xDE, 0xAD, 0xBE, 0xEF]), "m6kmamcwkdclp");
//! assert_eq!(*bc32::decode("M6KMAMCWKDCLP").unwrap(), vec![0xDE, 0xAD, 0xBE, 0xEF]);
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use bech32::{FromBase32, ToBase32, u5};
use thiserror::Error;
use zeroize::Zeroizing;

const CHECKSUM_LENGTH: usize = 6;
const BECH32M_CONST: u32 = 0x2bc8_30a3;
const GENERATOR: [u32; 5] = [
    0x3b6a_57b2,
    0x2650_8e6d,
    0x1ea1_19fa,
    0x3d42_33dd,
    0x2a14_62b3,
];

/// Static `HashMap` for character-to-value lookups
static CHAR_TO_U5: LazyLock<HashMap<char, u5>> = LazyLock::new(|| {
    (0..32u8)
        .filter_map(|value| u5::try_from_u8(value).ok())
        .map(|value| (value.to_char(), value))
        .collect()
});

/// Errors produced while decoding BC32 text
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Bc32Error {
    #[error("invalid BC32 character '{0}'")]
    InvalidChar(char),

    #[error("BC32 text is too short")]
    TooShort,

    #[error("BC32 checksum mismatch")]
    Checksum,

    #[error("invalid BC32 padding")]
    Padding,
}

fn polymod_step(chk: u32, value: u8) -> u32 {
    let top = chk >> 25;
    let mut chk = ((chk & 0x01ff_ffff) << 5) ^ u32::from(value);
    for (i, generator) in GENERATOR.iter().enumerate() {
        if (top >> i) & 1 == 1 {
            chk ^= generator;
        }
    }
    chk
}

/// Checksum state after the empty human-readable part and `values`
fn polymod(values: &[u5]) -> u32 {
    // The separator step of an empty human-readable part.
    let chk = polymod_step(1, 0);
    values
        .iter()
        .fold(chk, |chk, value| polymod_step(chk, value.to_u8()))
}

/// Encodes bytes as lowercase BC32 text
#[must_use]
pub fn encode(data: &[u8]) -> String {
    let values = data.to_base32();
    let mut chk = polymod(&values);
    for _ in 0..CHECKSUM_LENGTH {
        chk = polymod_step(chk, 0);
    }
    chk ^= BECH32M_CONST;

    let checksum = (0..CHECKSUM_LENGTH)
        .rev()
        .filter_map(|i| u5::try_from_u8(((chk >> (5 * i)) & 0x1f).to_le_bytes()[0]).ok());
    values.iter().copied().chain(checksum).map(u5::to_char).collect()
}

/// Decodes BC32 text, case-insensitively
///
/// # Errors
/// Returns a [`Bc32Error`] for characters outside the alphabet, a failed
/// checksum, or non-zero padding bits
pub fn decode(text: &str) -> Result<Zeroizing<Vec<u8>>, Bc32Error> {
    let values = text
        .trim()
        .chars()
        .map(|c| {
            CHAR_TO_U5
                .get(&c.to_ascii_lowercase())
                .copied()
                .ok_or(Bc32Error::InvalidChar(c))
        })
        .collect::<Result<Vec<u5>, _>>()?;

    if values.len() <= CHECKSUM_LENGTH {
        return Err(Bc32Error::TooShort);
    }
    if polymod(&values) != BECH32M_CONST {
        return Err(Bc32Error::Checksum);
    }

    let data = &values[..values.len() - CHECKSUM_LENGTH];
    let bytes = Vec::<u8>::from_base32(data).map_err(|_| Bc32Error::Padding)?;
    Ok(Zeroizing::new(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_encodings() {
        assert_eq!(encode(&[0xDE, 0xAD, 0xBE, 0xEF]), "m6kmamcwkdclp");
        assert_eq!(encode(&[0u8; 16]), "qqqqqqqqqqqqqqqqqqqqqqqqqqulqkkk");
    }

    #[test]
    fn test_round_trip() {
        let seed: Vec<u8> = (0u8..32).collect();
        assert_eq!(*decode(&encode(&seed)).unwrap(), seed);
    }

    #[test]
    fn test_rejects_corruption() {
        assert_eq!(decode("m6kmamcwkdclq").unwrap_err(), Bc32Error::Checksum);
        assert_eq!(decode("m6kmamcwkdclb").unwrap_err(), Bc32Error::InvalidChar('b'));
        assert_eq!(decode("qqq").unwrap_err(), Bc32Error::TooShort);
    }
}
