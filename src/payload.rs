//! CBOR bodies carried inside URs
//!
//! - `crypto-seed`: `{1: bytes(seed), ? 2: date}`
//! - `crypto-bip39`: `{1: [word, ...], 2: "en"}`
//!
//! Decoding ignores keys it does not know, such as a seed's creation date.

use ciborium::Value;
use ciborium::value::Integer;
use thiserror::Error;
use zeroize::Zeroizing;

const KEY_PAYLOAD: u8 = 1;
const KEY_LANGUAGE: u8 = 2;
const ENGLISH: &str = "en";

/// Errors produced while reading or writing a UR body
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("invalid CBOR: {0}")]
    Cbor(String),

    #[error("UR body is not a CBOR map")]
    NotAMap,

    #[error("UR body has no valid field {0}")]
    MissingField(u8),

    #[error("unsupported word list language \"{0}\"")]
    Language(String),
}

fn to_cbor(value: &Value) -> Result<Zeroizing<Vec<u8>>, PayloadError> {
    let mut out = Zeroizing::new(Vec::new());
    ciborium::into_writer(value, &mut *out).map_err(|e| PayloadError::Cbor(e.to_string()))?;
    Ok(out)
}

fn from_cbor(cbor: &[u8]) -> Result<Vec<(Value, Value)>, PayloadError> {
    let value: Value = ciborium::from_reader(cbor).map_err(|e| PayloadError::Cbor(e.to_string()))?;
    match value {
        Value::Map(entries) => Ok(entries),
        _ => Err(PayloadError::NotAMap),
    }
}

fn field(map: &[(Value, Value)], key: u8) -> Option<&Value> {
    map.iter()
        .find(|(k, _)| k.as_integer() == Some(Integer::from(key)))
        .map(|(_, v)| v)
}

/// Wraps seed bytes as a `crypto-seed` body
///
/// # Errors
/// Returns an error if serialization fails
///
/// # Examples
///
/// ```rust
/// use seedtool::payload::encode_seed;
///
/// let cbor = encode_seed(&[0xDE, 0xAD, 0xBE, 0xEF]).unwrap();
/// assert_eq!(hex::encode(&*cbor), "a10144deadbeef");
/// ```
pub fn encode_seed(seed: &[u8]) -> Result<Zeroizing<Vec<u8>>, PayloadError> {
    to_cbor(&Value::Map(vec![(
        Value::from(KEY_PAYLOAD),
        Value::Bytes(seed.to_vec()),
    )]))
}

/// Extracts the seed bytes from a `crypto-seed` body
///
/// # Errors
/// Returns an error unless the body is a map whose key 1 is a byte string
pub fn decode_seed(cbor: &[u8]) -> Result<Zeroizing<Vec<u8>>, PayloadError> {
    let map = from_cbor(cbor)?;
    let seed = field(&map, KEY_PAYLOAD)
        .and_then(Value::as_bytes)
        .ok_or(PayloadError::MissingField(KEY_PAYLOAD))?;
    Ok(Zeroizing::new(seed.clone()))
}

/// Wraps English mnemonic words as a `crypto-bip39` body
///
/// # Errors
/// Returns an error if serialization fails
pub fn encode_words(phrase: &str) -> Result<Zeroizing<Vec<u8>>, PayloadError> {
    let words = phrase
        .split_whitespace()
        .map(|word| Value::Text(word.to_string()))
        .collect();
    to_cbor(&Value::Map(vec![
        (Value::from(KEY_PAYLOAD), Value::Array(words)),
        (Value::from(KEY_LANGUAGE), Value::Text(ENGLISH.to_string())),
    ]))
}

/// Extracts the mnemonic from a `crypto-bip39` body, words joined by spaces
///
/// # Errors
/// Returns an error unless key 1 is an array of strings and the language,
/// when present, is English
pub fn decode_words(cbor: &[u8]) -> Result<Zeroizing<String>, PayloadError> {
    let map = from_cbor(cbor)?;

    if let Some(language) = field(&map, KEY_LANGUAGE) {
        let language = language
            .as_text()
            .ok_or(PayloadError::MissingField(KEY_LANGUAGE))?;
        if language != ENGLISH {
            return Err(PayloadError::Language(language.to_string()));
        }
    }

    let missing = || PayloadError::MissingField(KEY_PAYLOAD);
    let words = field(&map, KEY_PAYLOAD)
        .and_then(Value::as_array)
        .ok_or_else(missing)?
        .iter()
        .map(|word| word.as_text().ok_or_else(missing))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Zeroizing::new(words.join(" ")))
}
