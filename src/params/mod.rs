//! Command-line parameters and their validation
//!
//! Options are captured verbatim into [`RawOptions`]. [`validate`] then runs
//! every check once, in a fixed order, and either produces a [`Params`] whose
//! fields all agree with each other or stops at the first [`ConfigError`].
//!
//! # Examples
//!
//! ```rust
//! use seedtool::codec::UrCodec;
//! use seedtool::domain::{Format, IntRange};
//! use seedtool::params::{RawOptions, validate};
//!
//! let raw = RawOptions {
//!     input_format: Some("hex".to_string()),
//!     output_format: Some("ints".to_string()),
//!     low: Some("5".to_string()),
//!     high: Some("10".to_string()),
//!     args: vec!["deadbeef".to_string()],
//!     ..RawOptions::default()
//! };
//! let params = validate(&raw, || Ok(Vec::new()), &UrCodec).unwrap();
//! assert_eq!(params.output_format(), &Format::Ints(IntRange::new(5, 10).unwrap()));
//! ```

mod rules;

use std::io;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::codec::{Resource, ResourceCodec};
use crate::domain::{Count, Format};
use crate::error::ConfigError;
use crate::random::RandomSource;

pub use rules::{
    AcquiredInput, DEFAULT_MAX_PART_LENGTH, RequestedInput, acquire_input, apply_int_range,
    apply_slip39_groups, check_bip39_count, check_count_for_input, check_output_for_input,
    resolve_count, resolve_input_format, resolve_output_format, resolve_ur_output,
    select_random_source,
};

/// Options exactly as given on the command line
///
/// Nothing here has been checked. `ur` records whether `--ur` was present;
/// `max_part_length` is its optional value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawOptions {
    pub count: Option<String>,
    pub deterministic: Option<String>,
    pub input_format: Option<String>,
    pub output_format: Option<String>,
    pub low: Option<String>,
    pub high: Option<String>,
    pub group_threshold: Option<String>,
    pub groups: Vec<String>,
    pub ur: bool,
    pub max_part_length: Option<String>,
    pub args: Vec<String>,
}

/// Settings for UR-encoded output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrOutput {
    max_part_length: usize,
}

impl UrOutput {
    /// Maximum payload bytes per UR part
    #[must_use]
    pub fn max_part_length(&self) -> usize {
        self.max_part_length
    }
}

/// A fully validated invocation
#[derive(Debug)]
pub struct Params {
    count: Count,
    rng: RandomSource,
    input_format: Format,
    output_format: Format,
    input: Zeroizing<Vec<String>>,
    ur_input: Option<Resource>,
    ur_output: Option<UrOutput>,
}

impl Params {
    #[must_use]
    pub fn count(&self) -> Count {
        self.count
    }

    #[must_use]
    pub fn rng_mut(&mut self) -> &mut RandomSource {
        &mut self.rng
    }

    #[must_use]
    pub fn is_deterministic(&self) -> bool {
        self.rng.is_deterministic()
    }

    /// The concrete input format (for `--in ur`, the one named by the UR type)
    #[must_use]
    pub fn input_format(&self) -> &Format {
        &self.input_format
    }

    #[must_use]
    pub fn output_format(&self) -> &Format {
        &self.output_format
    }

    /// The decoded UR when the input arrived with `--in ur`
    #[must_use]
    pub fn ur_input(&self) -> Option<&Resource> {
        self.ur_input.as_ref()
    }

    /// UR output settings when `--ur` was given
    #[must_use]
    pub fn ur_output(&self) -> Option<UrOutput> {
        self.ur_output
    }

    /// All input units, one per argument or stdin line
    #[must_use]
    pub fn get_multiple_arguments(&self) -> &[String] {
        &self.input
    }

    /// The single input unit
    ///
    /// # Errors
    /// Returns an error unless exactly one unit was given
    pub fn get_one_argument(&self) -> Result<&str> {
        match self.input.as_slice() {
            [one] => Ok(one.as_str()),
            _ => bail!("Only one argument accepted."),
        }
    }

    /// All input units joined with single spaces
    #[must_use]
    pub fn get_combined_arguments(&self) -> Zeroizing<String> {
        Zeroizing::new(self.input.join(" "))
    }
}

/// Validates raw options into [`Params`]
///
/// Steps run in this order, and the first failure ends validation:
/// count, random source, input format, input acquisition (and UR decoding),
/// count against input format, output format, input/output compatibility,
/// ints range, BIP39 seed length, SLIP39 groups, UR output.
///
/// `read_stdin` is called at most once, only when input is needed and no
/// positional arguments were given.
///
/// # Errors
/// Returns the [`ConfigError`] of the first failing step
pub fn validate<F, C>(raw: &RawOptions, read_stdin: F, codec: &C) -> Result<Params, ConfigError>
where
    F: FnOnce() -> io::Result<Vec<String>>,
    C: ResourceCodec + ?Sized,
{
    let count = resolve_count(raw)?;
    let rng = select_random_source(raw);
    let requested = resolve_input_format(raw)?;
    let input = acquire_input(raw, requested, read_stdin, codec)?;
    check_count_for_input(raw, &input.format)?;
    let output_format = resolve_output_format(raw)?;
    check_output_for_input(&input.format, &output_format, input.is_ur())?;
    let output_format = apply_int_range(raw, output_format)?;
    check_bip39_count(count, &output_format)?;
    let output_format = apply_slip39_groups(raw, count, output_format)?;
    let ur_output = resolve_ur_output(raw, input.is_ur(), &output_format)?;

    debug!(
        input = input.format.name(),
        output = output_format.name(),
        "parameters validated"
    );

    Ok(Params {
        count,
        rng,
        input_format: input.format,
        output_format,
        input: input.lines,
        ur_input: input.resource,
        ur_output,
    })
}
