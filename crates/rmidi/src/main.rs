mod cmd;
mod exit;
mod logging;
mod output;

use std::path::PathBuf;

use clap::Parser;
use rmidi_device::{DeviceConfig, DEFAULT_DEVICE_DIR};
use rmidi_event::{DEFAULT_MAX_READ, EVENT_SIZE};

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "rmidi", version, about = "Raw MIDI device CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    /// Directory device names are resolved against.
    #[arg(
        long,
        value_name = "DIR",
        env = "RMIDI_DEVICE_DIR",
        default_value = DEFAULT_DEVICE_DIR,
        global = true
    )]
    device_dir: PathBuf,

    /// Maximum bytes requested by one read (at least one 3-byte event).
    #[arg(
        long,
        value_name = "BYTES",
        default_value_t = DEFAULT_MAX_READ,
        value_parser = parse_max_read,
        global = true
    )]
    max_read: usize,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn device_config(&self) -> DeviceConfig {
        DeviceConfig {
            device_dir: self.device_dir.clone(),
            max_read: self.max_read,
        }
    }
}

fn parse_max_read(value: &str) -> Result<usize, String> {
    let max_read: usize = value
        .parse()
        .map_err(|_| format!("invalid byte count: {value}"))?;
    if max_read < EVENT_SIZE {
        return Err(format!("must be at least {EVENT_SIZE}"));
    }
    Ok(max_read)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let config = cli.device_config();
    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, &config, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}
