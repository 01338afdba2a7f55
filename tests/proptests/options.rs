//! Property tests for option validation

use quickcheck::{Arbitrary, Gen, TestResult};
use quickcheck_macros::quickcheck;
use seedtool::domain::{Count, Format, GroupDescriptor, IntRange};
use seedtool::error::ConfigError;
use seedtool::params::check_output_for_input;

const FORMAT_NAMES: &[&str] = &[
    "random", "hex", "bc32", "bits", "cards", "dice", "base6", "base10", "ints", "bip39", "slip39",
];

/// Any format that can be named on the command line
#[derive(Clone, Debug)]
struct AnyFormat(Format);

impl Arbitrary for AnyFormat {
    fn arbitrary(g: &mut Gen) -> Self {
        let name = g.choose(FORMAT_NAMES).expect("non-empty");
        AnyFormat(Format::from_name(name).expect("known format"))
    }
}

#[quickcheck]
fn count_accepts_exactly_1_to_64(value: i16) -> bool {
    let parsed = Count::parse(&value.to_string());
    match parsed {
        Ok(count) => (1..=64).contains(&value) && i16::from(*count) == value,
        Err(ConfigError::InvalidCount { .. }) => !(1..=64).contains(&value),
        Err(_) => false,
    }
}

#[quickcheck]
fn group_spec_bounds(threshold: i8, count: i8) -> bool {
    let spec = format!("{threshold}-of-{count}");
    let in_bounds = 1 <= threshold && threshold <= count && count <= 16;
    let single_share = threshold == 1 && count > 1;

    match GroupDescriptor::parse(&spec) {
        Ok(group) => {
            in_bounds
                && !single_share
                && i8::try_from(group.threshold()) == Ok(threshold)
                && i8::try_from(group.count()) == Ok(count)
        }
        Err(ConfigError::GroupOutOfBounds(_)) => !in_bounds,
        Err(ConfigError::SingleShareGroup(_)) => in_bounds && single_share,
        Err(_) => false,
    }
}

#[test]
fn group_spec_boundaries() {
    assert!(GroupDescriptor::parse("1-of-1").is_ok());
    assert!(GroupDescriptor::parse("1-of-2").is_err());
    assert!(GroupDescriptor::parse("16-of-16").is_ok());
    assert!(GroupDescriptor::parse("17-of-16").is_err());
    assert!(GroupDescriptor::parse("2-of-17").is_err());
}

#[quickcheck]
fn group_spec_display_round_trips(threshold: u8, count: u8) -> TestResult {
    let Ok(group) = GroupDescriptor::parse(&format!("{threshold}-of-{count}")) else {
        return TestResult::discard();
    };
    TestResult::from_bool(GroupDescriptor::parse(&group.to_string()).ok() == Some(group))
}

#[quickcheck]
fn int_range_requires_ordered_bytes(low: i16, high: i16) -> bool {
    let valid = 0 <= low && low < high && high <= 255;
    match IntRange::new(i64::from(low), i64::from(high)) {
        Ok(range) => {
            valid
                && i16::from(range.low()) == low
                && i16::from(range.high()) == high
                && range.span() == u16::try_from(high - low + 1).unwrap()
        }
        Err(ConfigError::InvalidIntRange { .. }) => !valid,
        Err(_) => false,
    }
}

#[quickcheck]
fn compatibility_is_total_and_ordered(input: AnyFormat, output: AnyFormat, ur_in: bool) -> bool {
    let (input, output) = (input.0, output.0);
    let expected = output.is_hex()
        || output.is_bc32()
        || input.is_random()
        || input.is_hex()
        || input.is_bc32()
        || (ur_in && input.is_bip39() && output.is_bip39())
        || (ur_in && input.is_slip39() && output.is_slip39());

    match check_output_for_input(&input, &output, ur_in) {
        Ok(()) => expected,
        Err(ConfigError::IncompatibleFormats {
            input: input_name,
            output: output_name,
        }) => !expected && input_name == input.name() && output_name == output.name(),
        Err(_) => false,
    }
}
