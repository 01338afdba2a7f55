use clap::{ArgAction, Parser};

use crate::params::RawOptions;

/// Command-line surface
///
/// Every option is captured as a plain string. Checking happens afterwards,
/// all at once, in [`crate::params::validate`].
#[derive(Parser, Debug)]
#[command(name = "seedtool", version)]
#[command(about = "Converts cryptographic seeds between various forms.")]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// The input format: random|hex|bc32|bits|cards|dice|base6|base10|ints|bip39|slip39|ur (default: random)
    #[arg(short, long = "in", value_name = "FORMAT")]
    pub input: Option<String>,

    /// The output format: hex|bc32|bits|cards|dice|base6|base10|ints|bip39|slip39 (default: hex)
    #[arg(short, long = "out", value_name = "FORMAT")]
    pub output: Option<String>,

    /// The number of output units, 1-64 (default: 16)
    #[arg(short, long, value_name = "1-64", allow_negative_numbers = true)]
    pub count: Option<String>,

    /// Encode output as a Uniform Resource (UR), segmented into parts of at most MAX_PART_LENGTH bytes
    #[arg(
        short,
        long,
        value_name = "MAX_PART_LENGTH",
        num_args = 0..=1,
        require_equals = true
    )]
    pub ur: Option<Option<String>>,

    /// The lowest int returned by the ints format, 0-254 (default: 1)
    #[arg(
        short,
        long,
        value_name = "0-254",
        allow_negative_numbers = true,
        help_heading = "ints Output Options"
    )]
    pub low: Option<String>,

    /// The highest int returned by the ints format, 1-255 (default: 9)
    #[arg(
        short = 'h',
        long,
        value_name = "1-255",
        allow_negative_numbers = true,
        help_heading = "ints Output Options"
    )]
    pub high: Option<String>,

    /// The number of groups that must meet their threshold (default: 1)
    #[arg(
        short = 't',
        long,
        value_name = "1-16",
        allow_negative_numbers = true,
        help_heading = "SLIP39 Output Options"
    )]
    pub group_threshold: Option<String>,

    /// A group specification; may be repeated (default: 1-of-1)
    #[arg(
        short,
        long = "group",
        value_name = "T-of-N",
        action = ArgAction::Append,
        help_heading = "SLIP39 Output Options"
    )]
    pub groups: Vec<String>,

    /// Use a deterministic random number generator with the given seed
    #[arg(short, long, value_name = "SEED")]
    pub deterministic: Option<String>,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Input units; read from stdin when absent
    #[arg(value_name = "INPUT")]
    pub args: Vec<String>,
}

impl Cli {
    /// Hands the captured options over for validation
    #[must_use]
    pub fn into_raw_options(self) -> RawOptions {
        RawOptions {
            count: self.count,
            deterministic: self.deterministic,
            input_format: self.input,
            output_format: self.output,
            low: self.low,
            high: self.high,
            group_threshold: self.group_threshold,
            groups: self.groups,
            ur: self.ur.is_some(),
            max_part_length: self.ur.flatten(),
            args: self.args,
        }
    }
}
