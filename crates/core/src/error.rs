//! Error types for missile-commander-core.

use thiserror::Error;

/// Core library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// HID API initialization or device open failure.
    #[error("HID error: {0}")]
    Hid(String),

    /// The transport rejected an output report.
    #[error("failed to send {command} report: {reason}")]
    Write {
        command: &'static str,
        reason: String,
    },

    /// Value out of safe range.
    #[error("value out of range: {field} = {value} (allowed {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    /// Settings file read, parse, or write failure.
    #[error("settings error: {0}")]
    Settings(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
