//! The individual validation steps
//!
//! Each step reads the raw options plus whatever earlier steps produced and
//! returns the next piece of the configuration, or the first error it finds.
//! [`super::validate`] runs them in order.

use std::io;

use tracing::debug;
use zeroize::Zeroizing;

use crate::codec::{Resource, ResourceCodec};
use crate::domain::{
    Count, Format, GroupDescriptor, IntRange, Slip39Groups, UR_INPUT, is_bip39_seed_length_valid,
    is_slip39_seed_length_valid,
};
use crate::error::ConfigError;
use crate::random::RandomSource;

use super::{RawOptions, UrOutput};

/// Default maximum payload bytes per UR part
pub const DEFAULT_MAX_PART_LENGTH: usize = 2500;

/// The input format as named on the command line, before any UR is decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestedInput {
    Format(Format),
    /// `--in ur`: the format comes from the decoded UR's type
    Resource,
}

/// Input after acquisition, with a concrete format
#[derive(Debug)]
pub struct AcquiredInput {
    pub format: Format,
    pub lines: Zeroizing<Vec<String>>,
    pub resource: Option<Resource>,
}

impl AcquiredInput {
    #[must_use]
    pub fn is_ur(&self) -> bool {
        self.resource.is_some()
    }
}

fn parse_number(option: &'static str, value: &str) -> Result<i64, ConfigError> {
    value.parse().map_err(|source| ConfigError::InvalidNumber {
        option,
        value: value.to_string(),
        source,
    })
}

/// Resolves `--count`, defaulting to 16
///
/// # Errors
/// Returns [`ConfigError::InvalidCount`] for anything but an integer in 1..=64
pub fn resolve_count(raw: &RawOptions) -> Result<Count, ConfigError> {
    let count = match raw.count.as_deref() {
        Some(value) => Count::parse(value)?,
        None => Count::default(),
    };
    debug!(count = *count, "resolved count");
    Ok(count)
}

/// Picks the random source; `--deterministic` selects a seeded generator
#[must_use]
pub fn select_random_source(raw: &RawOptions) -> RandomSource {
    let rng = match raw.deterministic.as_deref() {
        Some(seed) => RandomSource::deterministic(seed),
        None => RandomSource::secure(),
    };
    debug!(deterministic = rng.is_deterministic(), "selected random source");
    rng
}

/// Resolves `--in`, defaulting to `random`
///
/// # Errors
/// Returns [`ConfigError::UnknownInputFormat`] for unrecognised names
pub fn resolve_input_format(raw: &RawOptions) -> Result<RequestedInput, ConfigError> {
    let requested = match raw.input_format.as_deref() {
        None => RequestedInput::Format(Format::Random),
        Some(UR_INPUT) => RequestedInput::Resource,
        Some(name) => Format::from_name(name)
            .map(RequestedInput::Format)
            .ok_or_else(|| ConfigError::UnknownInputFormat(name.to_string()))?,
    };
    debug!(?requested, "resolved input format");
    Ok(requested)
}

/// Collects the input units and, for `--in ur`, decodes the UR to find the
/// concrete input format
///
/// Positional arguments are used when present; otherwise `read_stdin` is
/// called once. The random format takes no input at all.
///
/// # Errors
/// - [`ConfigError::ArgumentsWithRandomInput`] if arguments accompany random input
/// - [`ConfigError::NoInput`] if no input is available
/// - [`ConfigError::Stdin`] if reading stdin fails
/// - [`ConfigError::Resource`] / [`ConfigError::UnknownResourceType`] for bad URs
pub fn acquire_input<F, C>(
    raw: &RawOptions,
    requested: RequestedInput,
    read_stdin: F,
    codec: &C,
) -> Result<AcquiredInput, ConfigError>
where
    F: FnOnce() -> io::Result<Vec<String>>,
    C: ResourceCodec + ?Sized,
{
    // Random input is generated, never read
    if requested == RequestedInput::Format(Format::Random) {
        if !raw.args.is_empty() {
            return Err(ConfigError::ArgumentsWithRandomInput);
        }
        return Ok(AcquiredInput {
            format: Format::Random,
            lines: Zeroizing::new(Vec::new()),
            resource: None,
        });
    }

    // Positional arguments win over stdin
    let lines = if raw.args.is_empty() {
        debug!("reading input from stdin");
        Zeroizing::new(read_stdin()?)
    } else {
        Zeroizing::new(raw.args.clone())
    };
    if lines.is_empty() {
        return Err(ConfigError::NoInput);
    }
    debug!(units = lines.len(), "acquired input");

    match requested {
        RequestedInput::Format(format) => Ok(AcquiredInput {
            format,
            lines,
            resource: None,
        }),
        RequestedInput::Resource => {
            // The UR type decides the concrete input format
            let resource = codec.decode(&lines)?;
            let format = Format::from_resource_type(resource.ur_type())
                .ok_or_else(|| ConfigError::UnknownResourceType(resource.ur_type().to_string()))?;
            debug!(ur_type = resource.ur_type(), %format, "decoded UR input");
            Ok(AcquiredInput {
                format,
                lines,
                resource: Some(resource),
            })
        }
    }
}

/// Rejects `--count` for inputs whose length fixes the seed size
///
/// # Errors
/// Returns [`ConfigError::CountNotAvailable`] for hex and bc32 input with `--count`
pub fn check_count_for_input(raw: &RawOptions, input: &Format) -> Result<(), ConfigError> {
    if raw.count.is_some() && input.is_universal() {
        return Err(ConfigError::CountNotAvailable {
            format: input.name(),
        });
    }
    Ok(())
}

/// Resolves `--out`, defaulting to `hex`
///
/// # Errors
/// Returns [`ConfigError::UnknownOutputFormat`] for unrecognised names and for `random`
pub fn resolve_output_format(raw: &RawOptions) -> Result<Format, ConfigError> {
    let format = match raw.output_format.as_deref() {
        None => Format::Hex,
        Some(name) => Format::from_name(name)
            .filter(|format| !format.is_random())
            .ok_or_else(|| ConfigError::UnknownOutputFormat(name.to_string()))?,
    };
    debug!(%format, "resolved output format");
    Ok(format)
}

/// Checks that `input` can be converted to `output`
///
/// Rules are tried in order and the first match accepts:
/// 1. hex output, 2. bc32 output, 3. random input, 4. hex input,
/// 5. bc32 input, 6. bip39 UR input to bip39, 7. slip39 UR input to slip39.
///
/// # Errors
/// Returns [`ConfigError::IncompatibleFormats`] when no rule matches
///
/// # Examples
///
/// ```rust
/// use seedtool::domain::Format;
/// use seedtool::params::check_output_for_input;
///
/// assert!(check_output_for_input(&Format::Dice, &Format::Hex, false).is_ok());
/// assert!(check_output_for_input(&Format::Bip39, &Format::Bip39, true).is_ok());
/// assert!(check_output_for_input(&Format::Bip39, &Format::Bip39, false).is_err());
/// assert!(check_output_for_input(&Format::Dice, &Format::Bits, false).is_err());
/// ```
pub fn check_output_for_input(
    input: &Format,
    output: &Format,
    is_ur_in: bool,
) -> Result<(), ConfigError> {
    if output.is_hex() || output.is_bc32() {
        return Ok(());
    }
    if input.is_random() || input.is_hex() || input.is_bc32() {
        return Ok(());
    }
    if is_ur_in && input.is_bip39() && output.is_bip39() {
        return Ok(());
    }
    if is_ur_in && input.is_slip39() && output.is_slip39() {
        return Ok(());
    }
    Err(ConfigError::IncompatibleFormats {
        input: input.name(),
        output: output.name(),
    })
}

/// Applies `--low`/`--high` to `ints` output, and rejects them otherwise
///
/// # Errors
/// - [`ConfigError::InvalidNumber`] if a bound is not an integer
/// - [`ConfigError::InvalidIntRange`] unless `0 <= low < high <= 255`
/// - [`ConfigError::OptionRequiresOutput`] if a bound is given for another format
pub fn apply_int_range(raw: &RawOptions, output: Format) -> Result<Format, ConfigError> {
    let Format::Ints(defaults) = output else {
        if raw.low.is_some() {
            return Err(ConfigError::OptionRequiresOutput {
                option: "--low",
                format: "ints",
            });
        }
        if raw.high.is_some() {
            return Err(ConfigError::OptionRequiresOutput {
                option: "--high",
                format: "ints",
            });
        }
        return Ok(output);
    };

    let low = match raw.low.as_deref() {
        Some(value) => parse_number("--low", value)?,
        None => i64::from(defaults.low()),
    };
    let high = match raw.high.as_deref() {
        Some(value) => parse_number("--high", value)?,
        None => i64::from(defaults.high()),
    };
    let range = IntRange::new(low, high)?;
    debug!(low = range.low(), high = range.high(), "resolved ints range");
    Ok(Format::Ints(range))
}

/// Checks the seed length for `bip39` output
///
/// # Errors
/// Returns [`ConfigError::Bip39Count`] unless the count is even and in 12..=32
pub fn check_bip39_count(count: Count, output: &Format) -> Result<(), ConfigError> {
    if output.is_bip39() && !is_bip39_seed_length_valid(*count) {
        return Err(ConfigError::Bip39Count { count: *count });
    }
    Ok(())
}

/// Resolves the group layout for `slip39` output, and rejects group options otherwise
///
/// # Errors
/// - [`ConfigError::OptionRequiresOutput`] for `--group`/`--group-threshold` without slip39 output
/// - [`ConfigError::Slip39Count`] unless the count is even and in 16..=32
/// - [`ConfigError::TooManyGroups`] for more than 16 groups
/// - any group specifier error from [`GroupDescriptor::parse`]
/// - [`ConfigError::InvalidNumber`] / [`ConfigError::InvalidGroupsThreshold`] for a bad threshold
pub fn apply_slip39_groups(
    raw: &RawOptions,
    count: Count,
    output: Format,
) -> Result<Format, ConfigError> {
    if !output.is_slip39() {
        if !raw.groups.is_empty() {
            return Err(ConfigError::OptionRequiresOutput {
                option: "--group",
                format: "slip39",
            });
        }
        if raw.group_threshold.is_some() {
            return Err(ConfigError::OptionRequiresOutput {
                option: "--group-threshold",
                format: "slip39",
            });
        }
        return Ok(output);
    }

    if !is_slip39_seed_length_valid(*count) {
        return Err(ConfigError::Slip39Count { count: *count });
    }

    if raw.groups.len() > Slip39Groups::MAX_GROUPS {
        return Err(ConfigError::TooManyGroups {
            given: raw.groups.len(),
            max: Slip39Groups::MAX_GROUPS,
        });
    }
    let groups = if raw.groups.is_empty() {
        vec![GroupDescriptor::SINGLE]
    } else {
        raw.groups
            .iter()
            .map(|spec| GroupDescriptor::parse(spec))
            .collect::<Result<Vec<_>, _>>()?
    };

    let threshold = match raw.group_threshold.as_deref() {
        Some(value) => parse_number("--group-threshold", value)?,
        None => 1,
    };
    let layout = Slip39Groups::new(groups, threshold)?;
    debug!(
        groups = layout.groups().len(),
        threshold = layout.threshold(),
        "resolved slip39 groups"
    );
    Ok(Format::Slip39(layout))
}

/// Resolves `--ur` output encoding
///
/// # Errors
/// - [`ConfigError::UrInAndOut`] when combined with `--in ur`
/// - [`ConfigError::InvalidNumber`] / [`ConfigError::InvalidMaxPartLength`] for a bad length
/// - [`ConfigError::UrOutputFormat`] unless the output is hex, bip39 or slip39
pub fn resolve_ur_output(
    raw: &RawOptions,
    is_ur_in: bool,
    output: &Format,
) -> Result<Option<UrOutput>, ConfigError> {
    if !raw.ur {
        return Ok(None);
    }
    if is_ur_in {
        return Err(ConfigError::UrInAndOut);
    }

    let max_part_length = match raw.max_part_length.as_deref() {
        Some(value) => {
            let length = parse_number("--ur", value)?;
            usize::try_from(length)
                .ok()
                .filter(|length| *length >= 1)
                .ok_or(ConfigError::InvalidMaxPartLength)?
        }
        None => DEFAULT_MAX_PART_LENGTH,
    };

    if output.resource_type().is_none() {
        return Err(ConfigError::UrOutputFormat(output.name()));
    }
    debug!(max_part_length, "UR output enabled");
    Ok(Some(UrOutput { max_part_length }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::UrCodec;

    fn no_stdin() -> io::Result<Vec<String>> {
        panic!("stdin must not be read");
    }

    fn empty_stdin() -> io::Result<Vec<String>> {
        Ok(Vec::new())
    }

    #[test]
    fn test_resolve_count_default_and_explicit() {
        assert_eq!(*resolve_count(&RawOptions::default()).unwrap(), 16);

        let raw = RawOptions {
            count: Some("64".to_string()),
            ..RawOptions::default()
        };
        assert_eq!(*resolve_count(&raw).unwrap(), 64);

        let raw = RawOptions {
            count: Some("65".to_string()),
            ..RawOptions::default()
        };
        assert!(matches!(resolve_count(&raw), Err(ConfigError::InvalidCount { .. })));
    }

    #[test]
    fn test_resolve_input_format() {
        let mut raw = RawOptions::default();
        assert_eq!(
            resolve_input_format(&raw).unwrap(),
            RequestedInput::Format(Format::Random)
        );

        raw.input_format = Some("ur".to_string());
        assert_eq!(resolve_input_format(&raw).unwrap(), RequestedInput::Resource);

        raw.input_format = Some("base7".to_string());
        let err = resolve_input_format(&raw).unwrap_err();
        assert_eq!(err.to_string(), "Unknown input format: base7");
    }

    #[test]
    fn test_random_input_rejects_arguments() {
        let raw = RawOptions {
            args: vec!["deadbeef".to_string()],
            ..RawOptions::default()
        };
        let err = acquire_input(
            &raw,
            RequestedInput::Format(Format::Random),
            no_stdin,
            &UrCodec,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ArgumentsWithRandomInput));
    }

    #[test]
    fn test_stdin_used_only_without_arguments() {
        let raw = RawOptions::default();
        let input = acquire_input(
            &raw,
            RequestedInput::Format(Format::Hex),
            || Ok(vec!["00ff".to_string()]),
            &UrCodec,
        )
        .unwrap();
        assert_eq!(*input.lines, vec!["00ff".to_string()]);

        let err = acquire_input(&raw, RequestedInput::Format(Format::Hex), empty_stdin, &UrCodec)
            .unwrap_err();
        assert!(matches!(err, ConfigError::NoInput));
    }

    #[test]
    fn test_stdin_failure_is_reported() {
        let raw = RawOptions::default();
        let err = acquire_input(
            &raw,
            RequestedInput::Format(Format::Dice),
            || Err(io::Error::other("closed")),
            &UrCodec,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Stdin(_)));
    }

    #[test]
    fn test_unknown_resource_type() {
        let raw = RawOptions {
            args: vec!["ur:crypto-psbt/aetdaowslg".to_string()],
            ..RawOptions::default()
        };
        let err = acquire_input(&raw, RequestedInput::Resource, no_stdin, &UrCodec).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownResourceType(ref t) if t == "crypto-psbt"));
    }

    #[test]
    fn test_malformed_resource() {
        let raw = RawOptions {
            args: vec!["not a ur".to_string()],
            ..RawOptions::default()
        };
        let err = acquire_input(&raw, RequestedInput::Resource, no_stdin, &UrCodec).unwrap_err();
        assert!(matches!(err, ConfigError::Resource(_)));
    }

    #[test]
    fn test_count_rejected_for_universal_inputs() {
        let raw = RawOptions {
            count: Some("16".to_string()),
            ..RawOptions::default()
        };
        let err = check_count_for_input(&raw, &Format::Hex).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The --count option is not available for hex input."
        );
        assert!(check_count_for_input(&raw, &Format::Bc32).is_err());
        assert!(check_count_for_input(&raw, &Format::Dice).is_ok());
        assert!(check_count_for_input(&RawOptions::default(), &Format::Hex).is_ok());
    }

    #[test]
    fn test_output_format_excludes_random() {
        let raw = RawOptions {
            output_format: Some("random".to_string()),
            ..RawOptions::default()
        };
        assert!(matches!(
            resolve_output_format(&raw),
            Err(ConfigError::UnknownOutputFormat(_))
        ));
        assert_eq!(resolve_output_format(&RawOptions::default()).unwrap(), Format::Hex);
    }

    #[test]
    fn test_unknown_output_format_is_named() {
        let raw = RawOptions {
            output_format: Some("base7".to_string()),
            ..RawOptions::default()
        };
        let err = resolve_output_format(&raw).unwrap_err();
        assert!(matches!(&err, ConfigError::UnknownOutputFormat(name) if name == "base7"));
        assert_eq!(err.to_string(), "Unknown output format: base7");
    }

    #[test]
    fn test_compatibility_rule_order() {
        // Hex output wins even for UR-less word-list input.
        let slip39 = Format::Slip39(Slip39Groups::default());
        assert!(check_output_for_input(&slip39, &Format::Hex, false).is_ok());
        assert!(check_output_for_input(&Format::Bip39, &Format::Bc32, false).is_ok());
        assert!(check_output_for_input(&Format::Random, &Format::Cards, false).is_ok());
        assert!(check_output_for_input(&Format::Hex, &Format::Bip39, false).is_ok());
        assert!(check_output_for_input(&Format::Bc32, &Format::Dice, false).is_ok());

        assert!(check_output_for_input(&slip39, &slip39, true).is_ok());
        assert!(check_output_for_input(&slip39, &slip39, false).is_err());

        let err = check_output_for_input(&slip39, &Format::Bip39, true).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Input format slip39 cannot be used with output format bip39"
        );
    }

    #[test]
    fn test_int_range_overrides() {
        let raw = RawOptions {
            low: Some("5".to_string()),
            high: Some("10".to_string()),
            ..RawOptions::default()
        };
        let format = apply_int_range(&raw, Format::Ints(IntRange::default())).unwrap();
        assert_eq!(format, Format::Ints(IntRange::new(5, 10).unwrap()));

        // Only one bound given: the other keeps its default.
        let raw = RawOptions {
            high: Some("100".to_string()),
            ..RawOptions::default()
        };
        let format = apply_int_range(&raw, Format::Ints(IntRange::default())).unwrap();
        assert_eq!(format, Format::Ints(IntRange::new(1, 100).unwrap()));

        let raw = RawOptions {
            low: Some("9".to_string()),
            ..RawOptions::default()
        };
        assert!(matches!(
            apply_int_range(&raw, Format::Ints(IntRange::default())),
            Err(ConfigError::InvalidIntRange { low: 9, high: 9 })
        ));
    }

    #[test]
    fn test_int_range_bad_number() {
        let raw = RawOptions {
            low: Some("one".to_string()),
            ..RawOptions::default()
        };
        assert!(matches!(
            apply_int_range(&raw, Format::Ints(IntRange::default())),
            Err(ConfigError::InvalidNumber { option: "--low", .. })
        ));
    }

    #[test]
    fn test_int_range_options_need_ints_output() {
        let raw = RawOptions {
            high: Some("10".to_string()),
            ..RawOptions::default()
        };
        let err = apply_int_range(&raw, Format::Hex).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Option --high can only be used with the \"ints\" output format."
        );
    }

    #[test]
    fn test_bip39_count() {
        assert!(check_bip39_count(Count::new(16).unwrap(), &Format::Bip39).is_ok());
        assert!(check_bip39_count(Count::new(13).unwrap(), &Format::Bip39).is_err());
        assert!(check_bip39_count(Count::new(13).unwrap(), &Format::Hex).is_ok());
    }

    #[test]
    fn test_slip39_defaults_to_single_group() {
        let format = apply_slip39_groups(
            &RawOptions::default(),
            Count::default(),
            Format::Slip39(Slip39Groups::default()),
        )
        .unwrap();
        let Format::Slip39(layout) = format else {
            panic!("expected slip39");
        };
        assert_eq!(layout.groups(), &[GroupDescriptor::SINGLE]);
        assert_eq!(layout.threshold(), 1);
    }

    #[test]
    fn test_slip39_groups_threshold() {
        let groups: Vec<String> = ["2-of-3", "3-of-5", "1-of-1"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let slip39 = || Format::Slip39(Slip39Groups::default());

        for (threshold, ok) in [("0", false), ("1", true), ("3", true), ("4", false)] {
            let raw = RawOptions {
                groups: groups.clone(),
                group_threshold: Some(threshold.to_string()),
                ..RawOptions::default()
            };
            let result = apply_slip39_groups(&raw, Count::default(), slip39());
            assert_eq!(result.is_ok(), ok, "threshold {threshold}");
        }
    }

    #[test]
    fn test_slip39_rejects_short_seed() {
        let err = apply_slip39_groups(
            &RawOptions::default(),
            Count::new(12).unwrap(),
            Format::Slip39(Slip39Groups::default()),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Slip39Count { count: 12 }));
    }

    #[test]
    fn test_too_many_groups_checked_before_parsing() {
        let raw = RawOptions {
            groups: vec!["garbage".to_string(); 17],
            ..RawOptions::default()
        };
        let err = apply_slip39_groups(
            &raw,
            Count::default(),
            Format::Slip39(Slip39Groups::default()),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::TooManyGroups { given: 17, max: 16 }));
    }

    #[test]
    fn test_group_options_need_slip39_output() {
        let raw = RawOptions {
            group_threshold: Some("1".to_string()),
            ..RawOptions::default()
        };
        let err = apply_slip39_groups(&raw, Count::default(), Format::Bip39).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Option --group-threshold can only be used with the \"slip39\" output format."
        );
    }

    #[test]
    fn test_group_needs_slip39_output() {
        let raw = RawOptions {
            groups: vec!["2-of-3".to_string()],
            ..RawOptions::default()
        };
        let err = apply_slip39_groups(&raw, Count::default(), Format::Hex).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OptionRequiresOutput {
                option: "--group",
                format: "slip39"
            }
        ));
        assert_eq!(
            err.to_string(),
            "Option --group can only be used with the \"slip39\" output format."
        );
    }

    #[test]
    fn test_ur_output() {
        let mut raw = RawOptions {
            ur: true,
            ..RawOptions::default()
        };
        let ur = resolve_ur_output(&raw, false, &Format::Hex).unwrap().unwrap();
        assert_eq!(ur.max_part_length(), DEFAULT_MAX_PART_LENGTH);

        raw.max_part_length = Some("100".to_string());
        let ur = resolve_ur_output(&raw, false, &Format::Bip39).unwrap().unwrap();
        assert_eq!(ur.max_part_length(), 100);

        assert!(matches!(
            resolve_ur_output(&raw, true, &Format::Hex),
            Err(ConfigError::UrInAndOut)
        ));
        assert!(matches!(
            resolve_ur_output(&raw, false, &Format::Dice),
            Err(ConfigError::UrOutputFormat("dice"))
        ));

        raw.max_part_length = Some("0".to_string());
        assert!(matches!(
            resolve_ur_output(&raw, false, &Format::Hex),
            Err(ConfigError::InvalidMaxPartLength)
        ));
    }

    #[test]
    fn test_ur_output_off() {
        assert!(
            resolve_ur_output(&RawOptions::default(), true, &Format::Dice)
                .unwrap()
                .is_none()
        );
    }
}
