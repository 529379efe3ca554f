use rmidi_device::{Device, DeviceConfig};
use rmidi_event::Event;
use tracing::info;

use crate::cmd::SendArgs;
use crate::exit::{device_error, CliResult, SUCCESS};

pub fn run(args: SendArgs, config: &DeviceConfig) -> CliResult<i32> {
    let mut device = Device::open_with_config(&args.name, config)
        .map_err(|err| device_error("open failed", err))?;

    let event = Event::new(args.status, args.data1, args.data2);
    device
        .write_short(&event)
        .map_err(|err| device_error("write failed", err))?;
    info!(
        path = ?device.path(),
        status = event.status,
        data1 = event.data1,
        data2 = event.data2,
        "sent short message"
    );

    device
        .close()
        .map_err(|err| device_error("close failed", err))?;
    Ok(SUCCESS)
}

/// Parse a status byte given as decimal or `0x` hex.
pub fn parse_status(input: &str) -> Result<u8, String> {
    let value = parse_int(input)?;
    u8::try_from(value).map_err(|_| format!("status byte out of range (0..=255): {input}"))
}

/// Parse a data byte. Values 128..=255 are taken as the raw wire byte.
pub fn parse_data(input: &str) -> Result<i8, String> {
    let value = parse_int(input)?;
    match value {
        -128..=127 => Ok(value as i8),
        128..=255 => Ok(value as u8 as i8),
        _ => Err(format!("data byte out of range (-128..=255): {input}")),
    }
}

fn parse_int(input: &str) -> Result<i64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("value must not be empty".to_string());
    }

    let parsed = match input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        Some(hex) => i64::from_str_radix(hex, 16),
        None => input.parse(),
    };
    parsed.map_err(|_| format!("invalid byte value: {input}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_status_decimal_and_hex() {
        assert_eq!(parse_status("144").unwrap(), 0x90);
        assert_eq!(parse_status("0x90").unwrap(), 0x90);
        assert_eq!(parse_status("0XfF").unwrap(), 0xFF);
    }

    #[test]
    fn parse_status_rejects_invalid_values() {
        assert!(parse_status("256").is_err());
        assert!(parse_status("-1").is_err());
        assert!(parse_status("note").is_err());
        assert!(parse_status("").is_err());
    }

    #[test]
    fn parse_data_reinterprets_high_bytes() {
        assert_eq!(parse_data("60").unwrap(), 60);
        assert_eq!(parse_data("-1").unwrap(), -1);
        assert_eq!(parse_data("255").unwrap(), -1);
        assert_eq!(parse_data("0x80").unwrap(), -128);
    }

    #[test]
    fn parse_data_rejects_out_of_range() {
        assert!(parse_data("256").is_err());
        assert!(parse_data("-129").is_err());
    }
}
