use clap::ValueEnum;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;

/// Log targets that follow `--log-level`; everything else stays at warn or quieter.
const RMIDI_TARGETS: [&str; 3] = ["rmidi", "rmidi_device", "rmidi_event"];

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Per-target filter: device and codec logs at `level`, dependencies capped at warn.
pub fn log_filter(level: LogLevel) -> Targets {
    let level = LevelFilter::from(level);
    RMIDI_TARGETS.iter().fold(
        Targets::new().with_default(level.min(LevelFilter::WARN)),
        |targets, target| targets.with_target(*target, level),
    )
}

/// Send logs to stderr. Stdout is reserved for decoded events.
pub fn init_logging(format: LogFormat, level: LogLevel) {
    let filter = log_filter(level);
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(LevelFilter::TRACE)
        .with_ansi(false);

    // Logging setup failure is not fatal for a one-shot command.
    let _ = match format {
        LogFormat::Text => builder.with_target(false).finish().with(filter).try_init(),
        LogFormat::Json => builder.json().finish().with(filter).try_init(),
    };
}
