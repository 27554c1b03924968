//! Launcher discovery and connection.

use crate::error::{Error, Result};
use crate::transport::HidapiTransport;
use crate::{LAUNCHER_PID, LAUNCHER_USAGE, LAUNCHER_USAGE_PAGE, LAUNCHER_VID};
use tracing::{debug, info};

/// Information about a discovered launcher.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub vid: u16,
    pub pid: u16,
    pub usage_page: u16,
    pub usage: u16,
    pub path: String,
    pub serial: Option<String>,
}

/// Whether a HID interface is the launcher's command interface.
///
/// All four identifiers must match.
pub fn is_launcher(vid: u16, pid: u16, usage_page: u16, usage: u16) -> bool {
    vid == LAUNCHER_VID
        && pid == LAUNCHER_PID
        && usage_page == LAUNCHER_USAGE_PAGE
        && usage == LAUNCHER_USAGE
}

fn matching_interfaces<'a>(
    api: &'a hidapi::HidApi,
) -> impl Iterator<Item = &'a hidapi::DeviceInfo> + 'a {
    api.device_list().filter(|info| {
        is_launcher(
            info.vendor_id(),
            info.product_id(),
            info.usage_page(),
            info.usage(),
        )
    })
}

/// Discover all connected launchers.
pub fn discover_devices() -> Result<Vec<DeviceInfo>> {
    debug!("Starting HID device enumeration");
    let api = hidapi::HidApi::new().map_err(|e| Error::Hid(e.to_string()))?;

    let devices: Vec<DeviceInfo> = matching_interfaces(&api)
        .map(|info| {
            info!(
                vid = format_args!("0x{:04X}", info.vendor_id()),
                pid = format_args!("0x{:04X}", info.product_id()),
                path = %info.path().to_string_lossy(),
                "Found launcher"
            );
            DeviceInfo {
                vid: info.vendor_id(),
                pid: info.product_id(),
                usage_page: info.usage_page(),
                usage: info.usage(),
                path: info.path().to_string_lossy().into_owned(),
                serial: info.serial_number().map(|s| s.to_string()),
            }
        })
        .collect();

    debug!(count = devices.len(), "Device enumeration complete");
    Ok(devices)
}

/// Open the first matching launcher for read/write.
///
/// Returns `Ok(None)` when no launcher is attached.
pub fn open_first_launcher() -> Result<Option<HidapiTransport>> {
    let api = hidapi::HidApi::new().map_err(|e| Error::Hid(e.to_string()))?;

    let Some(info) = matching_interfaces(&api).next() else {
        debug!("No launcher attached");
        return Ok(None);
    };

    let device = info.open_device(&api).map_err(|e| {
        Error::Hid(format!(
            "open HID device (VID=0x{:04X} PID=0x{:04X}): {e}",
            info.vendor_id(),
            info.product_id()
        ))
    })?;

    info!(path = %info.path().to_string_lossy(), "Launcher opened");
    Ok(Some(HidapiTransport::new(device)))
}
