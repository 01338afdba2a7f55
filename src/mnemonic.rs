//! BIP39 mnemonics for every even seed length from 12 to 32 bytes
//!
//! Seeds whose length is a multiple of four bytes are standard BIP39 and go
//! through the `bip39` crate. The other even lengths use the same English word
//! list and SHA-256 checksum, with `ENT/32` checksum bits rounded up to a
//! whole word. A 12-byte seed therefore becomes 9 words.
//!
//! # Examples
//!
//! ```rust
//! use seedtool::mnemonic::{entropy_to_words, words_to_entropy};
//!
//! let words = entropy_to_words(&[0xFF; 12]).unwrap();
//! assert_eq!(words.as_str(), "zoo zoo zoo zoo zoo zoo zoo zoo zebra");
//! assert_eq!(*words_to_entropy(&words).unwrap(), vec![0xFF; 12]);
//! ```

use anyhow::{Context, Result, anyhow, bail};
use bip39::{Language, Mnemonic};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::domain::is_bip39_seed_length_valid;

const WORD_BITS: usize = 11;
const WORD_MASK: u32 = (1 << WORD_BITS) - 1;

/// Number of words encoding a seed of `seed_len` bytes
#[must_use]
pub fn word_count(seed_len: usize) -> usize {
    let bits = seed_len * 8;
    (bits + bits / 32).div_ceil(WORD_BITS)
}

fn is_standard_length(seed_len: usize) -> bool {
    seed_len % 4 == 0
}

/// Encode seed bytes as an English mnemonic
///
/// # Errors
/// Returns an error unless the seed is 12 to 32 bytes long and even
pub fn entropy_to_words(entropy: &[u8]) -> Result<Zeroizing<String>> {
    let valid = u8::try_from(entropy.len()).is_ok_and(is_bip39_seed_length_valid);
    if !valid {
        bail!(
            "BIP39 seeds must be 12 to 32 bytes and even, got {} bytes",
            entropy.len()
        );
    }

    if is_standard_length(entropy.len()) {
        let mnemonic = Mnemonic::from_entropy_in(Language::English, entropy)
            .context("Failed to create mnemonic from seed")?;
        return Ok(Zeroizing::new(mnemonic.to_string()));
    }

    let list = Language::English.word_list();
    let words: Vec<&str> = word_indices(entropy).iter().map(|&i| list[i]).collect();
    Ok(Zeroizing::new(words.join(" ")))
}

/// Decode an English mnemonic back into seed bytes
///
/// Words are separated by whitespace and matched case-insensitively.
///
/// # Errors
/// Returns an error for unknown words, an unsupported word count, or a
/// checksum mismatch
pub fn words_to_entropy(phrase: &str) -> Result<Zeroizing<Vec<u8>>> {
    let words = Zeroizing::new(
        phrase
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>(),
    );
    let seed_len = (12..=32)
        .step_by(2)
        .find(|&len| word_count(len) == words.len())
        .ok_or_else(|| anyhow!("A BIP39 mnemonic cannot have {} words", words.len()))?;

    if is_standard_length(seed_len) {
        let mnemonic = Mnemonic::parse_in(Language::English, words.join(" "))
            .context("Failed to parse input mnemonic")?;
        return Ok(Zeroizing::new(mnemonic.to_entropy()));
    }

    let mut indices = Zeroizing::new(Vec::with_capacity(words.len()));
    for word in words.iter() {
        let index = Language::English
            .find_word(word)
            .ok_or_else(|| anyhow!("Unknown BIP39 word \"{word}\""))?;
        indices.push(usize::from(index));
    }

    // Unpack 11-bit word indices into bytes; the tail is checksum.
    let mut entropy = Zeroizing::new(Vec::with_capacity(seed_len + 2));
    let mut acc: u32 = 0;
    let mut bits = 0;
    for &index in indices.iter() {
        acc = (acc << WORD_BITS) | index_bits(index);
        bits += WORD_BITS;
        while bits >= 8 {
            bits -= 8;
            entropy.push(low_byte(acc >> bits));
        }
        acc &= (1 << bits) - 1;
    }
    entropy.truncate(seed_len);

    if *word_indices(&entropy) != *indices {
        bail!("Invalid mnemonic checksum");
    }
    Ok(entropy)
}

/// Word indices for the seed followed by as many checksum bits as fill the
/// last word
fn word_indices(entropy: &[u8]) -> Zeroizing<Vec<usize>> {
    let count = word_count(entropy.len());
    let checksum = Sha256::digest(entropy);

    let mut indices = Zeroizing::new(Vec::with_capacity(count));
    let mut acc: u32 = 0;
    let mut bits = 0;
    for &byte in entropy.iter().chain(checksum.iter()) {
        acc = (acc << 8) | u32::from(byte);
        bits += 8;
        if bits >= WORD_BITS {
            bits -= WORD_BITS;
            indices.push(usize::from(word_index(acc >> bits)));
            acc &= (1 << bits) - 1;
        }
        if indices.len() == count {
            break;
        }
    }
    indices
}

fn word_index(bits: u32) -> u16 {
    u16::try_from(bits & WORD_MASK).unwrap_or_default()
}

fn index_bits(index: usize) -> u32 {
    u32::try_from(index).unwrap_or_default() & WORD_MASK
}

fn low_byte(bits: u32) -> u8 {
    bits.to_le_bytes()[0]
}
