//! Uniform Resource (UR) text encoding for seeds
//!
//! A UR is a self-describing text string: a `ur:` scheme, a type such as
//! `crypto-seed`, and a payload encoded as minimal bytewords. Large payloads
//! may be split across several parts.
//!
//! # Format
//!
//! - Single part: `ur:<type>/<bytewords>`
//! - Segmented: `ur:<type>/<seq>-<total>/<bytewords>`, with `seq` in `1..=total`
//!
//! Minimal bytewords render each byte as the first and last letter of its
//! word in the 256-word bytewords list. Every body ends with the CRC-32 of
//! its bytes (big-endian), so corrupted or truncated parts are rejected.
//!
//! # Examples
//!
//! ```rust
//! use seedtool::codec::{Resource, ResourceCodec, UrCodec};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let seed = Resource::new("crypto-seed", vec![0xDE, 0xAD, 0xBE, 0xEF])?;
//! let parts = UrCodec.encode(&seed, 2500);
//! assert_eq!(parts, vec!["ur:crypto-seed/uepmrnwskensotht".to_string()]);
//!
//! let decoded = UrCodec.decode(&parts)?;
//! assert_eq!(decoded.ur_type(), "crypto-seed");
//! assert_eq!(decoded.payload(), &[0xDE, 0xAD, 0xBE, 0xEF]);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use crc::{CRC_32_ISO_HDLC, Crc};
use thiserror::Error;
use zeroize::Zeroizing;

/// CRC32 algorithm for body integrity checking
const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

const SCHEME: &str = "ur:";

/// Upper bound on the number of parts a segmented UR may declare
const MAX_PARTS: usize = 1 << 16;

/// The bytewords list, indexed by byte value
#[rustfmt::skip]
const BYTEWORDS: [&str; 256] = [
    "able", "acid", "also", "apex", "aqua", "arch", "atom", "aunt",
    "away", "axis", "back", "bald", "barn", "belt", "beta", "bias",
    "blue", "body", "brag", "brew", "bulb", "buzz", "calm", "cash",
    "cats", "chef", "city", "claw", "code", "cola", "cook", "cost",
    "crux", "curl", "cusp", "cyan", "dark", "data", "days", "deli",
    "dice", "diet", "door", "down", "draw", "drop", "drum", "dull",
    "duty", "each", "easy", "echo", "edge", "epic", "even", "exam",
    "exit", "eyes", "fact", "fair", "fern", "figs", "film", "fish",
    "fizz", "flap", "flew", "flux", "foxy", "free", "frog", "fuel",
    "fund", "gala", "game", "gear", "gems", "gift", "girl", "glow",
    "good", "gray", "grim", "guru", "gush", "gyro", "half", "hang",
    "hard", "hawk", "heat", "help", "high", "hill", "holy", "hope",
    "horn", "huts", "iced", "idea", "idle", "inch", "inky", "into",
    "iris", "iron", "item", "jade", "jazz", "join", "jolt", "jowl",
    "judo", "jugs", "jump", "junk", "jury", "keep", "keno", "kept",
    "keys", "kick", "kiln", "king", "kite", "kiwi", "knob", "lamb",
    "lava", "lazy", "leaf", "legs", "liar", "limp", "lion", "list",
    "logo", "loud", "love", "luau", "luck", "lung", "main", "many",
    "math", "maze", "memo", "menu", "meow", "mild", "mint", "miss",
    "monk", "nail", "navy", "need", "news", "next", "noon", "note",
    "numb", "obey", "oboe", "omit", "onyx", "open", "oval", "owls",
    "paid", "part", "peck", "play", "plus", "poem", "pool", "pose",
    "puff", "puma", "purr", "quad", "quiz", "race", "ramp", "real",
    "redo", "rich", "road", "rock", "roof", "ruby", "ruin", "runs",
    "rust", "safe", "saga", "scar", "sets", "silk", "skew", "slot",
    "soap", "solo", "song", "stub", "surf", "swan", "taco", "task",
    "taxi", "tent", "tied", "time", "tiny", "toil", "tomb", "toys",
    "trip", "tuna", "twin", "ugly", "undo", "unit", "urge", "user",
    "vast", "very", "veto", "vial", "vibe", "view", "visa", "void",
    "vows", "wall", "wand", "warm", "wasp", "wave", "waxy", "webs",
    "what", "when", "whiz", "wolf", "work", "yank", "yawn", "yell",
    "yoga", "yurt", "zaps", "zero", "zest", "zinc", "zone", "zoom",
];

/// Static `HashMap` for O(1) minimal-pair-to-byte lookups
static MINIMAL_TO_BYTE: LazyLock<HashMap<[u8; 2], u8>> = LazyLock::new(|| {
    (0..=u8::MAX)
        .zip(BYTEWORDS.iter())
        .map(|(byte, word)| (minimal_pair(word), byte))
        .collect()
});

fn minimal_pair(word: &str) -> [u8; 2] {
    let bytes = word.as_bytes();
    [bytes[0], bytes[bytes.len() - 1]]
}

/// Errors produced while decoding UR text
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("no UR parts given")]
    Empty,

    #[error("\"{0}\" does not start with \"ur:\"")]
    MissingScheme(String),

    #[error("invalid UR type \"{0}\"")]
    InvalidType(String),

    #[error("malformed UR part \"{0}\"")]
    Malformed(String),

    #[error("invalid bytewords body")]
    InvalidBytewords,

    #[error("checksum mismatch: expected {expected:08x}, got {actual:08x}")]
    Checksum { expected: u32, actual: u32 },

    #[error("invalid sequence \"{0}\"")]
    InvalidSequence(String),

    #[error("parts disagree on type or total")]
    InconsistentParts,

    #[error("missing part {seq} of {total}")]
    MissingPart { seq: usize, total: usize },
}

/// A typed payload carried by a UR
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    ur_type: String,
    payload: Zeroizing<Vec<u8>>,
}

impl Resource {
    /// Creates a resource
    ///
    /// # Errors
    /// Returns [`CodecError::InvalidType`] unless the type is non-empty lowercase
    /// ASCII letters, digits and hyphens
    pub fn new(ur_type: impl Into<String>, payload: Vec<u8>) -> Result<Self, CodecError> {
        let ur_type = ur_type.into();
        if !is_valid_type(&ur_type) {
            return Err(CodecError::InvalidType(ur_type));
        }
        Ok(Self {
            ur_type,
            payload: Zeroizing::new(payload),
        })
    }

    #[must_use]
    pub fn ur_type(&self) -> &str {
        &self.ur_type
    }

    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

fn is_valid_type(ur_type: &str) -> bool {
    !ur_type.is_empty()
        && ur_type
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Encodes and decodes resources as text parts
pub trait ResourceCodec {
    /// Decodes one resource from its text parts (any order)
    ///
    /// # Errors
    /// Returns a [`CodecError`] if any part is malformed, corrupted, or missing
    fn decode(&self, parts: &[String]) -> Result<Resource, CodecError>;

    /// Encodes a resource into one or more text parts, each body carrying at
    /// most `max_part_length` payload bytes
    fn encode(&self, resource: &Resource, max_part_length: usize) -> Vec<String>;
}

/// The UR text codec described in the module docs
#[derive(Debug, Default, Clone, Copy)]
pub struct UrCodec;

impl ResourceCodec for UrCodec {
    fn decode(&self, parts: &[String]) -> Result<Resource, CodecError> {
        let parts: Vec<String> = parts
            .iter()
            .map(|part| part.trim().to_lowercase())
            .filter(|part| !part.is_empty())
            .collect();

        let first = parts.first().ok_or(CodecError::Empty)?;
        let (ur_type, _) = split_part(first)?;

        if parts.len() == 1 {
            if let (ur_type, PartBody::Single(body)) = split_part(first)? {
                return Resource::new(ur_type, decode_bytewords(body)?.to_vec());
            }
        }

        let mut total = None;
        let mut fragments: Vec<Option<Zeroizing<Vec<u8>>>> = Vec::new();

        for part in &parts {
            let (part_type, body) = split_part(part)?;
            let PartBody::Segment { seq, total: part_total, body } = body else {
                // A single-part UR cannot be mixed with others.
                return Err(CodecError::InconsistentParts);
            };
            if part_type != ur_type || total.is_some_and(|t| t != part_total) {
                return Err(CodecError::InconsistentParts);
            }
            if total.is_none() {
                total = Some(part_total);
                fragments.resize(part_total, None);
            }

            let slot = &mut fragments[seq - 1];
            if slot.is_some() {
                return Err(CodecError::InvalidSequence(format!("{seq}-{part_total}")));
            }
            *slot = Some(decode_bytewords(body)?);
        }

        let total = fragments.len();
        let mut payload = Vec::new();
        for (idx, fragment) in fragments.iter().enumerate() {
            let fragment = fragment.as_ref().ok_or(CodecError::MissingPart {
                seq: idx + 1,
                total,
            })?;
            payload.extend_from_slice(fragment);
        }

        Resource::new(ur_type, payload)
    }

    fn encode(&self, resource: &Resource, max_part_length: usize) -> Vec<String> {
        let payload = resource.payload();
        let max_part_length = max_part_length.max(1);

        if payload.len() <= max_part_length {
            return vec![format!(
                "{SCHEME}{}/{}",
                resource.ur_type(),
                encode_bytewords(payload)
            )];
        }

        let chunks: Vec<&[u8]> = payload.chunks(max_part_length).collect();
        let total = chunks.len();
        chunks
            .iter()
            .enumerate()
            .map(|(idx, chunk)| {
                format!(
                    "{SCHEME}{}/{}-{total}/{}",
                    resource.ur_type(),
                    idx + 1,
                    encode_bytewords(chunk)
                )
            })
            .collect()
    }
}

enum PartBody<'a> {
    Single(&'a str),
    Segment {
        seq: usize,
        total: usize,
        body: &'a str,
    },
}

/// Splits a lowercased part into its type and body
fn split_part(part: &str) -> Result<(&str, PartBody<'_>), CodecError> {
    let path = part
        .strip_prefix(SCHEME)
        .ok_or_else(|| CodecError::MissingScheme(part.to_string()))?;

    let components: Vec<&str> = path.split('/').collect();
    let (ur_type, body) = match components.as_slice() {
        [ur_type, body] => (*ur_type, PartBody::Single(body)),
        [ur_type, sequence, body] => {
            let (seq, total) = parse_sequence(sequence)?;
            (*ur_type, PartBody::Segment { seq, total, body })
        }
        _ => return Err(CodecError::Malformed(part.to_string())),
    };

    if !is_valid_type(ur_type) {
        return Err(CodecError::InvalidType(ur_type.to_string()));
    }
    Ok((ur_type, body))
}

fn parse_sequence(sequence: &str) -> Result<(usize, usize), CodecError> {
    let invalid = || CodecError::InvalidSequence(sequence.to_string());
    let (seq, total) = sequence.split_once('-').ok_or_else(invalid)?;
    let seq: usize = seq.parse().map_err(|_| invalid())?;
    let total: usize = total.parse().map_err(|_| invalid())?;
    if seq == 0 || seq > total || total > MAX_PARTS {
        return Err(invalid());
    }
    Ok((seq, total))
}

/// Encodes bytes as minimal bytewords followed by their CRC-32
fn encode_bytewords(data: &[u8]) -> String {
    let checksum = CRC32.checksum(data).to_be_bytes();
    let mut out = String::with_capacity((data.len() + checksum.len()) * 2);
    for &byte in data.iter().chain(checksum.iter()) {
        let [first, last] = minimal_pair(BYTEWORDS[usize::from(byte)]);
        out.push(char::from(first));
        out.push(char::from(last));
    }
    out
}

/// Decodes minimal bytewords, verifying and stripping the trailing CRC-32
fn decode_bytewords(body: &str) -> Result<Zeroizing<Vec<u8>>, CodecError> {
    let letters = body.as_bytes();
    if letters.len() % 2 != 0 {
        return Err(CodecError::InvalidBytewords);
    }

    let mut bytes = Zeroizing::new(Vec::with_capacity(letters.len() / 2));
    for pair in letters.chunks_exact(2) {
        let byte = MINIMAL_TO_BYTE
            .get(&[pair[0], pair[1]])
            .ok_or(CodecError::InvalidBytewords)?;
        bytes.push(*byte);
    }

    if bytes.len() < 4 {
        return Err(CodecError::InvalidBytewords);
    }
    let data_len = bytes.len() - 4;
    let expected = u32::from_be_bytes([
        bytes[data_len],
        bytes[data_len + 1],
        bytes[data_len + 2],
        bytes[data_len + 3],
    ]);
    let actual = CRC32.checksum(&bytes[..data_len]);
    if expected != actual {
        return Err(CodecError::Checksum { expected, actual });
    }

    bytes.truncate(data_len);
    Ok(bytes)
}
