//! missile-commander-core: launcher control and preview overlay geometry.
//!
//! This crate drives a USB HID toy missile launcher with fixed 9-byte
//! output reports and maps face-detection boxes from camera-stream pixels
//! onto a letterboxed preview control.

pub mod command;
pub mod device;
pub mod error;
pub mod geometry;
pub mod launcher;
pub mod settings;
pub mod transport;

/// Launcher USB Vendor ID.
pub const LAUNCHER_VID: u16 = 0x2123;
/// Launcher USB Product ID.
pub const LAUNCHER_PID: u16 = 0x1010;
/// HID usage page of the launcher's command interface (Generic Desktop).
pub const LAUNCHER_USAGE_PAGE: u16 = 0x01;
/// HID usage of the launcher's command interface.
pub const LAUNCHER_USAGE: u16 = 0x10;
