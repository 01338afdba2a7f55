//! Seed conversion between textual and binary encodings
//!
//! The binary drives everything through [`params::validate`] and
//! [`commands::convert`]; the modules are public so integration tests and the
//! WASM bindings can reach the same entry points.

#[cfg(feature = "cli")]
pub mod cli;
pub mod bc32;
pub mod codec;
pub mod commands;
pub mod domain;
pub mod error;
pub mod mnemonic;
pub mod params;
pub mod payload;
pub mod random;
pub mod wasm;
