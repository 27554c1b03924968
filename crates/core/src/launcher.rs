//! Launcher control: command dispatch and timed pulse moves.
//!
//! A launcher is either bound to a transport or unbound. The state is fixed
//! at construction; an unbound launcher accepts every command and writes
//! nothing.
//!
//! Overlapping pulses are not coordinated. A move issued while an earlier
//! pulse is still sleeping runs concurrently with it, and the earlier
//! pulse's Stop can cut the later move short.

use crate::command::{Command, Direction};
use crate::device::open_first_launcher;
use crate::error::Result;
use crate::transport::{send_command, HidTransport, HidapiTransport};
use std::time::Duration;
use tracing::{debug, trace};

/// A missile launcher, possibly without a device behind it.
pub struct Launcher<T = HidapiTransport> {
    transport: Option<T>,
}

impl Launcher<HidapiTransport> {
    /// Open the first attached launcher.
    ///
    /// No attached launcher is not an error: the returned launcher is
    /// unbound and ignores all commands.
    pub fn connect() -> Result<Self> {
        let transport = open_first_launcher()?;
        debug!(bound = transport.is_some(), "Launcher initialized");
        Ok(Self { transport })
    }
}

impl<T: HidTransport> Launcher<T> {
    /// Bind a launcher to an already-open transport.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport: Some(transport),
        }
    }

    /// A launcher with no device.
    pub fn unbound() -> Self {
        Self { transport: None }
    }

    /// Whether a device is bound.
    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> Option<&T> {
        self.transport.as_ref()
    }

    /// Send a single command. No-op when unbound.
    pub fn send(&self, command: Command) -> Result<()> {
        match &self.transport {
            Some(transport) => send_command(transport, command),
            None => {
                trace!(command = command.name(), "No launcher bound, command dropped");
                Ok(())
            }
        }
    }

    /// Move in `direction` for `duration_ms`, then stop.
    ///
    /// Stop is sent after the delay even if the move report failed. The
    /// first failure (move, then stop) is returned.
    pub async fn move_direction(&self, direction: Direction, duration_ms: u64) -> Result<()> {
        debug!(%direction, duration_ms, "Pulse move");
        let moved = self.send(direction.command());
        tokio::time::sleep(Duration::from_millis(duration_ms)).await;
        let stopped = self.send(Command::Stop);
        moved.and(stopped)
    }

    pub async fn move_up(&self, duration_ms: u64) -> Result<()> {
        self.move_direction(Direction::Up, duration_ms).await
    }

    pub async fn move_down(&self, duration_ms: u64) -> Result<()> {
        self.move_direction(Direction::Down, duration_ms).await
    }

    pub async fn move_left(&self, duration_ms: u64) -> Result<()> {
        self.move_direction(Direction::Left, duration_ms).await
    }

    pub async fn move_right(&self, duration_ms: u64) -> Result<()> {
        self.move_direction(Direction::Right, duration_ms).await
    }

    /// Fire once. The device resets the trigger itself.
    pub fn fire(&self) -> Result<()> {
        self.send(Command::Fire)
    }

    /// Switch the launcher light.
    pub fn set_light(&self, on: bool) -> Result<()> {
        self.send(Command::light(on))
    }
}
