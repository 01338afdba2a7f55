//! Domain types for seed conversion
//!
//! This module contains validated newtypes and the closed format set:
//! - [`Count`] - Number of output units (1..=64)
//! - [`GroupDescriptor`] - One `T-of-N` SLIP39 group
//! - [`IntRange`] - Value range for the `ints` format
//! - [`Slip39Groups`] - Group list and groups threshold for `slip39` output
//! - [`Format`] - The encodings, each carrying only its own parameters

mod count;
mod format;
mod group;
mod int_range;

pub use count::Count;
pub use format::{
    CRYPTO_BIP39, CRYPTO_SEED, CRYPTO_SLIP39, Format, Slip39Groups, UR_INPUT,
    is_bip39_seed_length_valid, is_slip39_seed_length_valid,
};
pub use group::GroupDescriptor;
pub use int_range::IntRange;
