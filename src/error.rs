//! Validation errors for seedtool invocations
//!
//! Every check in the parameter pipeline reports one of these variants. The
//! user-facing text lives only in the `Display` impls below; callers decide
//! where and how to print it.

use std::num::ParseIntError;

use thiserror::Error;

use crate::codec::CodecError;

/// A fatal configuration error. The invocation cannot proceed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("COUNT must be in [1-64].")]
    InvalidCount { value: String },

    #[error("Invalid value \"{value}\" for {option}: {source}")]
    InvalidNumber {
        option: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Unknown input format: {0}")]
    UnknownInputFormat(String),

    #[error("Unknown output format: {0}")]
    UnknownOutputFormat(String),

    #[error("Do not provide arguments when using the random (default) input format.")]
    ArgumentsWithRandomInput,

    #[error("No input provided.")]
    NoInput,

    #[error("Failed to read input from stdin: {0}")]
    Stdin(#[from] std::io::Error),

    #[error("Could not decode UR: {0}")]
    Resource(#[from] CodecError),

    #[error("Unknown UR type: {0}")]
    UnknownResourceType(String),

    #[error("The --count option is not available for {format} input.")]
    CountNotAvailable { format: &'static str },

    #[error("Input format {input} cannot be used with output format {output}")]
    IncompatibleFormats {
        input: &'static str,
        output: &'static str,
    },

    #[error("--low and --high must specify a range in [0-255].")]
    InvalidIntRange { low: i64, high: i64 },

    #[error("Option {option} can only be used with the \"{format}\" output format.")]
    OptionRequiresOutput {
        option: &'static str,
        format: &'static str,
    },

    #[error("For BIP39 COUNT must be in [12-32] and even.")]
    Bip39Count { count: u8 },

    #[error("For SLIP39 COUNT must be in [16-32] and even.")]
    Slip39Count { count: u8 },

    #[error("There must be no more than {max} groups.")]
    TooManyGroups { given: usize, max: usize },

    #[error("Could not parse group specifier: \"{0}\"")]
    UnparsableGroup(String),

    #[error("Invalid group specifier \"{0}\": 1 <= T <= N <= 16")]
    GroupOutOfBounds(String),

    #[error("Invalid group specifier \"{0}\": 1-of-N groups where N > 1 are not supported.")]
    SingleShareGroup(String),

    #[error("Group threshold must be <= the number of groups.")]
    InvalidGroupsThreshold { threshold: i64, groups: usize },

    #[error("The --ur option may not be combined with the --in ur input method.")]
    UrInAndOut,

    #[error("MAX_PART_LENGTH must be at least 1.")]
    InvalidMaxPartLength,

    #[error("The --ur option is only available for hex, BIP39 and SLIP39 output, not {0}.")]
    UrOutputFormat(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = ConfigError::UnknownInputFormat("base7".to_string());
        assert_eq!(err.to_string(), "Unknown input format: base7");

        let err = ConfigError::IncompatibleFormats {
            input: "bip39",
            output: "slip39",
        };
        assert_eq!(
            err.to_string(),
            "Input format bip39 cannot be used with output format slip39"
        );

        let err = ConfigError::UnparsableGroup("two-of-three".to_string());
        assert!(err.to_string().contains("\"two-of-three\""));
    }

    #[test]
    fn test_invalid_number_keeps_parse_message() {
        let source = "x5".parse::<i64>().unwrap_err();
        let err = ConfigError::InvalidNumber {
            option: "--low",
            value: "x5".to_string(),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("--low"));
        assert!(msg.contains("invalid digit"));
    }
}
