//! WASM bindings for seedtool
//!
//! Options arrive as a JSON object with the same fields as
//! [`RawOptions`](crate::params::RawOptions). There is no stdin in the
//! browser, so input units must be passed in `args`.

use anyhow::Result;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::codec::UrCodec;
use crate::commands;
use crate::domain::{Format, IntRange, Slip39Groups};
use crate::params::{Params, RawOptions, validate};

/// Initialize panic hook for better error messages in the browser console
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Use wee_alloc as the global allocator for smaller WASM binary size
#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// The validated configuration, as reported back to JavaScript
#[derive(Debug, Serialize)]
pub struct ConfigSummary {
    pub input_format: &'static str,
    pub output_format: &'static str,
    pub count: u8,
    pub deterministic: bool,
    pub ur_input: bool,
    pub ur_max_part_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ints: Option<IntRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slip39: Option<Slip39Groups>,
}

impl From<&Params> for ConfigSummary {
    fn from(params: &Params) -> Self {
        let output = params.output_format();
        Self {
            input_format: params.input_format().name(),
            output_format: output.name(),
            count: *params.count(),
            deterministic: params.is_deterministic(),
            ur_input: params.ur_input().is_some(),
            ur_max_part_length: params.ur_output().map(|ur| ur.max_part_length()),
            ints: match output {
                Format::Ints(range) => Some(*range),
                _ => None,
            },
            slip39: match output {
                Format::Slip39(groups) => Some(groups.clone()),
                _ => None,
            },
        }
    }
}

/// Result of a conversion (for JSON serialization)
#[derive(Debug, Serialize)]
pub struct ConversionResult {
    /// The converted seed, or the UR parts when UR output was requested
    pub output: Vec<String>,
}

fn parse_options(options_json: &str) -> Result<RawOptions> {
    Ok(serde_json::from_str(options_json)?)
}

fn validate_options(raw: &RawOptions) -> Result<Params> {
    Ok(validate(raw, || Ok(Vec::new()), &UrCodec)?)
}

/// Validate a JSON options object and summarize the resulting configuration
///
/// # Errors
/// Returns an error if the JSON is malformed or the options are invalid
pub fn validate_json(options_json: &str) -> Result<String> {
    let params = validate_options(&parse_options(options_json)?)?;
    Ok(serde_json::to_string(&ConfigSummary::from(&params))?)
}

/// Validate a JSON options object and run the conversion
///
/// # Errors
/// Returns an error if validation fails or the input cannot be converted
pub fn convert_json(options_json: &str) -> Result<String> {
    let mut params = validate_options(&parse_options(options_json)?)?;
    let output = commands::convert(&mut params, &UrCodec)?;
    let result = ConversionResult {
        output: output.lines().map(str::to_owned).collect(),
    };
    Ok(serde_json::to_string(&result)?)
}

/// Check seedtool options without converting anything
///
/// # Example (JavaScript)
/// ```javascript
/// const summary = JSON.parse(wasm_validate(JSON.stringify({
///     input_format: "hex",
///     output_format: "ints",
///     low: "5",
///     high: "10",
///     args: ["deadbeef"],
/// })));
/// console.log(`${summary.input_format} -> ${summary.output_format}`);
/// ```
#[wasm_bindgen]
pub fn wasm_validate(options_json: &str) -> Result<String, JsValue> {
    validate_json(options_json).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert a seed as described by a JSON options object
///
/// # Example (JavaScript)
/// ```javascript
/// const result = JSON.parse(wasm_convert(JSON.stringify({
///     input_format: "hex",
///     output_format: "bip39",
///     args: ["00000000000000000000000000000000"],
/// })));
/// console.log(result.output[0]);
/// ```
#[wasm_bindgen]
pub fn wasm_convert(options_json: &str) -> Result<String, JsValue> {
    convert_json(options_json).map_err(|e| JsValue::from_str(&format!("Conversion failed: {e}")))
}
