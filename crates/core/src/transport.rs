//! HID transport abstraction for launcher communication.
//!
//! Provides a trait-based transport layer so that real HID devices and
//! mock devices share the same interface.

use crate::command::{Command, REPORT_LEN};
use crate::error::{Error, Result};
use std::sync::Mutex;
use tracing::trace;

/// Abstraction over raw HID output.
///
/// Implementations write one output report and return the number of bytes
/// accepted by the device.
pub trait HidTransport: Send + Sync {
    /// Write a raw HID output report.
    fn write_report(&self, data: &[u8]) -> Result<usize>;
}

/// Transport backed by an open hidapi device.
///
/// The handle sits behind a mutex so a launcher can be shared across async
/// tasks. Only individual writes are serialized.
pub struct HidapiTransport {
    device: Mutex<hidapi::HidDevice>,
}

impl HidapiTransport {
    pub fn new(device: hidapi::HidDevice) -> Self {
        Self {
            device: Mutex::new(device),
        }
    }
}

impl HidTransport for HidapiTransport {
    fn write_report(&self, data: &[u8]) -> Result<usize> {
        let device = self
            .device
            .lock()
            .map_err(|_| Error::Hid("device handle poisoned".to_string()))?;
        device
            .write(data)
            .map_err(|e| Error::Hid(format!("write: {e}")))
    }
}

/// Send one launcher command and check that the full report went out.
pub fn send_command(transport: &dyn HidTransport, command: Command) -> Result<()> {
    let report = command.report();
    trace!(
        command = command.name(),
        report_hex = format_args!("{:02X?}", report),
        "HID TX"
    );

    let written = transport
        .write_report(report)
        .map_err(|e| Error::Write {
            command: command.name(),
            reason: e.to_string(),
        })?;

    if written < REPORT_LEN {
        return Err(Error::Write {
            command: command.name(),
            reason: format!("short write: {written} of {REPORT_LEN} bytes"),
        });
    }

    Ok(())
}

/// A mock HID transport for testing.
///
/// Records every report written, with the (tokio) time it was written.
#[cfg(test)]
pub mod mock {
    use super::*;
    use tokio::time::Instant;

    /// Mock transport that records writes and can reject chosen reports.
    pub struct MockTransport {
        writes: Mutex<Vec<(Vec<u8>, Instant)>>,
        rejected: Mutex<Vec<Vec<u8>>>,
        short_write: Mutex<Option<usize>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self {
                writes: Mutex::new(Vec::new()),
                rejected: Mutex::new(Vec::new()),
                short_write: Mutex::new(None),
            }
        }

        /// Make every write of `report` fail.
        pub fn reject(&self, report: &[u8]) {
            self.rejected.lock().unwrap().push(report.to_vec());
        }

        /// Make every write report only `n` bytes accepted.
        pub fn accept_only(&self, n: usize) {
            *self.short_write.lock().unwrap() = Some(n);
        }

        /// Reports written so far, in order (including rejected attempts).
        pub fn writes(&self) -> Vec<Vec<u8>> {
            self.writes
                .lock()
                .unwrap()
                .iter()
                .map(|(report, _)| report.clone())
                .collect()
        }

        /// Write timestamps, in order.
        pub fn write_times(&self) -> Vec<Instant> {
            self.writes.lock().unwrap().iter().map(|(_, t)| *t).collect()
        }
    }

    impl HidTransport for MockTransport {
        fn write_report(&self, data: &[u8]) -> Result<usize> {
            self.writes
                .lock()
                .unwrap()
                .push((data.to_vec(), Instant::now()));

            if self.rejected.lock().unwrap().iter().any(|r| r == data) {
                return Err(Error::Hid(format!("mock: write rejected {:02X?}", data)));
            }

            Ok(self.short_write.lock().unwrap().unwrap_or(data.len()))
        }
    }
}
