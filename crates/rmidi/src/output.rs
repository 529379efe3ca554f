use std::io::{IsTerminal, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use rmidi_event::Event;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct EventOutput<'a> {
    device: &'a str,
    status: u8,
    data1: i8,
    data2: i8,
    timestamp: String,
}

pub fn print_events(events: &[Event], device: &Path, format: OutputFormat) {
    if events.is_empty() {
        return;
    }
    let device = device.display().to_string();

    match format {
        OutputFormat::Json => {
            for event in events {
                let out = EventOutput {
                    device: &device,
                    status: event.status,
                    data1: event.data1,
                    data2: event.data2,
                    timestamp: unix_timestamp(event.timestamp),
                };
                println!(
                    "{}",
                    serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
                );
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["STATUS", "DATA1", "DATA2", "TIMESTAMP"]);
            for event in events {
                table.add_row(vec![
                    format!("{:#04x}", event.status),
                    event.data1.to_string(),
                    event.data2.to_string(),
                    unix_timestamp(event.timestamp),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for event in events {
                println!(
                    "status={:#04x} data1={} data2={} ts={}",
                    event.status,
                    event.data1,
                    event.data2,
                    unix_timestamp(event.timestamp)
                );
            }
        }
        OutputFormat::Raw => {
            let wire: Vec<u8> = events.iter().flat_map(|e| e.to_wire()).collect();
            print_raw(&wire);
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn unix_timestamp(ts: SystemTime) -> String {
    ts.duration_since(UNIX_EPOCH)
        .map(|d| format!("{}.{:06}", d.as_secs(), d.subsec_micros()))
        .unwrap_or_else(|_| "0.000000".to_string())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn timestamp_has_microseconds() {
        let ts = UNIX_EPOCH + Duration::from_micros(1_500_000_250);
        assert_eq!(unix_timestamp(ts), "1500.000250");
    }
}
