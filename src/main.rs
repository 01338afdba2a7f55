use std::io::{self, BufRead};

use anyhow::Result;
use clap::{CommandFactory, Parser, error::ErrorKind};
use tracing_subscriber::EnvFilter;

use seedtool::cli::Cli;
use seedtool::codec::UrCodec;
use seedtool::commands::convert;
use seedtool::params::validate;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Read input units from stdin, one per line, until end of stream
fn read_stdin_lines() -> io::Result<Vec<String>> {
    if atty::is(atty::Stream::Stdin) {
        eprintln!("Enter input, one unit per line (Ctrl-D to finish):");
    }

    let stdin = io::stdin();
    let handle = stdin.lock();
    handle.lines().collect()
}

fn main() -> Result<()> {
    init_tracing();

    let raw = Cli::parse().into_raw_options();

    let mut params = match validate(&raw, read_stdin_lines, &UrCodec) {
        Ok(params) => params,
        Err(err) => Cli::command().error(ErrorKind::ValueValidation, err).exit(),
    };

    let output = convert(&mut params, &UrCodec)?;
    println!("{output}");

    Ok(())
}
