use anyhow::{Context, Result, anyhow, bail};
use tracing::debug;
use zeroize::Zeroizing;

use crate::bc32;
use crate::codec::{Resource, ResourceCodec};
use crate::domain::{CRYPTO_BIP39, CRYPTO_SEED, Format, IntRange};
use crate::mnemonic;
use crate::params::Params;
use crate::payload;
use crate::random::RandomSource;

const CARD_RANKS: &[u8] = b"a23456789tjqk";
const CARD_SUITS: &[u8] = b"cdhs";

/// Convert validated parameters into the requested output
///
/// Returns the output text: the encoded seed, or newline-separated UR parts
/// when UR output was requested.
///
/// # Errors
/// Returns an error if the input cannot be decoded in its format, or if the
/// output format is not supported by this build
pub fn convert<C>(params: &mut Params, codec: &C) -> Result<String>
where
    C: ResourceCodec + ?Sized,
{
    // Decode the input into raw seed bytes
    let seed = acquire_seed(params)?;
    debug!(
        input = params.input_format().name(),
        bytes = seed.len(),
        "seed acquired"
    );

    let output = params.output_format();
    let Some(ur) = params.ur_output() else {
        return render_output(output, &seed);
    };

    // Wrap the seed in the CBOR body for the output's UR type
    let resource = match output {
        Format::Hex => Resource::new(CRYPTO_SEED, payload::encode_seed(&seed)?.to_vec())?,
        Format::Bip39 => {
            let words = mnemonic::entropy_to_words(&seed)?;
            Resource::new(CRYPTO_BIP39, payload::encode_words(&words)?.to_vec())?
        }
        other => bail!("UR output is not supported for {other} by this build"),
    };

    // Split into parts no longer than the requested length
    let parts = codec.encode(&resource, ur.max_part_length());
    debug!(parts = parts.len(), "UR output encoded");
    Ok(parts.join("\n"))
}

/// Produce the seed bytes described by the input
///
/// # Errors
/// Returns an error if the input units are malformed for their format
pub fn acquire_seed(params: &mut Params) -> Result<Zeroizing<Vec<u8>>> {
    // A decoded UR carries its seed in a CBOR body
    if let Some(resource) = params.ur_input() {
        let body = resource.payload();
        return match params.input_format() {
            Format::Hex => payload::decode_seed(body).context("Failed to read crypto-seed UR"),
            Format::Bip39 => {
                let words =
                    payload::decode_words(body).context("Failed to read crypto-bip39 UR")?;
                mnemonic::words_to_entropy(&words)
            }
            other => bail!("{other} UR input is not supported by this build"),
        };
    }

    let count = usize::from(*params.count());
    let format = params.input_format().clone();
    match format {
        Format::Random => Ok(params.rng_mut().random_data(count)),
        Format::Hex => {
            let bytes = hex::decode(params.get_one_argument()?.trim())
                .context("Failed to parse hex input")?;
            Ok(Zeroizing::new(bytes))
        }
        Format::Bc32 => {
            let bytes =
                bc32::decode(params.get_one_argument()?).context("Failed to parse bc32 input")?;
            Ok(bytes)
        }
        Format::Bip39 => mnemonic::words_to_entropy(&params.get_combined_arguments()),
        Format::Bits
        | Format::Dice
        | Format::Base6
        | Format::Base10
        | Format::Cards
        | Format::Ints(_) => {
            let units = parse_units(&format, &params.get_combined_arguments())?;
            // Units carry too little entropy to be a seed themselves; they key
            // a generator that yields `count` bytes.
            Ok(RandomSource::from_entropy(&units).random_data(count))
        }
        Format::Slip39(_) => {
            bail!("{format} input is not supported by this build")
        }
    }
}

/// Parse unit-format input (dice rolls, bits, cards, ...) into unit values
///
/// Whitespace is ignored except for `ints`, where it separates values.
///
/// # Errors
/// Returns an error naming the first invalid unit
pub fn parse_units(format: &Format, input: &str) -> Result<Zeroizing<Vec<u8>>> {
    let mut units = Zeroizing::new(Vec::new());

    // Ints are whitespace separated; every other format is one character per unit
    if let Format::Ints(range) = format {
        for token in input.split_whitespace() {
            let value: u8 = token
                .parse()
                .with_context(|| format!("Invalid int \"{token}\""))?;
            if value < range.low() || value > range.high() {
                bail!(
                    "Int {value} is outside [{}-{}]",
                    range.low(),
                    range.high()
                );
            }
            units.push(value);
        }
    } else if format == &Format::Cards {
        // Cards are rank and suit letter pairs, spaces optional
        let letters: Vec<u8> = input
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .map(|b| b.to_ascii_lowercase())
            .collect();
        if letters.len() % 2 != 0 {
            bail!("Cards must be given as rank and suit pairs, e.g. \"5d\"");
        }
        for pair in letters.chunks_exact(2) {
            let card = String::from_utf8_lossy(pair).into_owned();
            let rank = CARD_RANKS
                .iter()
                .position(|&r| r == pair[0])
                .ok_or_else(|| anyhow!("Invalid card \"{card}\""))?;
            let suit = CARD_SUITS
                .iter()
                .position(|&s| s == pair[1])
                .ok_or_else(|| anyhow!("Invalid card \"{card}\""))?;
            units.push(u8::try_from(suit * CARD_RANKS.len() + rank)?);
        }
    } else {
        let (first, last) = match format {
            Format::Bits => (b'0', b'1'),
            Format::Dice => (b'1', b'6'),
            Format::Base6 => (b'0', b'5'),
            Format::Base10 => (b'0', b'9'),
            other => bail!("{other} is not a unit format"),
        };
        for b in input.bytes().filter(|b| !b.is_ascii_whitespace()) {
            if !(first..=last).contains(&b) {
                bail!(
                    "Invalid {format} digit '{}'",
                    char::from(b).escape_default()
                );
            }
            units.push(b - first);
        }
    }

    if units.is_empty() {
        bail!("No {format} units in input");
    }
    Ok(units)
}

/// Render seed bytes in the output format
///
/// Unit formats map each byte to one unit (`byte mod base`).
///
/// # Errors
/// Returns an error if the seed length is not valid for BIP39, or if the
/// format is not supported by this build
pub fn render_output(format: &Format, seed: &[u8]) -> Result<String> {
    let digits = |base: u8, offset: u8| -> String {
        seed.iter()
            .map(|b| char::from(b'0' + offset + b % base))
            .collect()
    };

    let output = match format {
        Format::Hex => hex::encode(seed),
        Format::Bits => digits(2, 0),
        Format::Dice => digits(6, 1),
        Format::Base6 => digits(6, 0),
        Format::Base10 => digits(10, 0),
        Format::Cards => seed.iter().map(|b| card_name(b % 52)).collect(),
        Format::Ints(range) => render_ints(seed, *range),
        Format::Bc32 => bc32::encode(seed),
        Format::Bip39 => mnemonic::entropy_to_words(seed)?.to_string(),
        Format::Slip39(_) | Format::Random => {
            bail!("{format} output is not supported by this build")
        }
    };
    Ok(output)
}

fn render_ints(seed: &[u8], range: IntRange) -> String {
    seed.iter()
        .map(|&b| (u16::from(range.low()) + u16::from(b) % range.span()).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn card_name(index: u8) -> String {
    let index = usize::from(index);
    let rank = CARD_RANKS[index % CARD_RANKS.len()];
    let suit = CARD_SUITS[index / CARD_RANKS.len()];
    [char::from(rank), char::from(suit)].iter().collect()
}
