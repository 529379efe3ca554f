use clap::{Args, Subcommand};
use rmidi_device::DeviceConfig;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod read;
pub mod send;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read events from a device and print them.
    Read(ReadArgs),
    /// Write a single short message to a device.
    Send(SendArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, config: &DeviceConfig, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Read(args) => read::run(args, config, format),
        Command::Send(args) => send::run(args, config),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Device name (e.g. rmidi0), resolved against --device-dir.
    pub name: String,
    /// Exit after printing N events.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Device name (e.g. rmidi0), resolved against --device-dir.
    pub name: String,
    /// Status byte (decimal or 0x-prefixed hex).
    #[arg(long, short = 's', value_parser = send::parse_status)]
    pub status: u8,
    /// First data byte (-128..=255).
    #[arg(long, value_parser = send::parse_data, allow_negative_numbers = true)]
    pub data1: i8,
    /// Second data byte (-128..=255).
    #[arg(long, value_parser = send::parse_data, allow_negative_numbers = true)]
    pub data2: i8,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
