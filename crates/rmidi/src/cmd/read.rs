use rmidi_device::{CloseHandle, Device, DeviceConfig};
use tracing::{debug, info};

use crate::cmd::ReadArgs;
use crate::exit::{device_error, CliError, CliResult, SUCCESS};
use crate::output::{print_events, OutputFormat};

pub fn run(args: ReadArgs, config: &DeviceConfig, format: OutputFormat) -> CliResult<i32> {
    let mut device = Device::open_with_config(&args.name, config)
        .map_err(|err| device_error("open failed", err))?;
    install_ctrlc_handler(device.close_handle())?;
    info!(path = ?device.path(), "reading midi events");

    let mut printed = 0usize;

    while args.count.map_or(true, |count| printed < count) {
        let mut events = match device.read() {
            Ok(events) => events,
            Err(err) if err.is_closed() => {
                debug!("device closed, stopping");
                break;
            }
            Err(err) => return Err(device_error("read failed", err)),
        };

        if events.is_empty() {
            info!("device returned no data, stopping");
            break;
        }

        if let Some(count) = args.count {
            events.truncate(count.saturating_sub(printed));
        }
        print_events(&events, device.path(), format);
        printed = printed.saturating_add(events.len());
    }

    device
        .close()
        .map_err(|err| device_error("close failed", err))?;
    Ok(SUCCESS)
}

fn install_ctrlc_handler(handle: CloseHandle) -> CliResult<()> {
    ctrlc::set_handler(move || {
        let _ = handle.close();
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}
