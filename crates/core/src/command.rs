//! Launcher command packets.
//!
//! Every command is a fixed 9-byte output report:
//! - byte 0: HID report ID, always zero
//! - byte 1: command class (status, motion, light)
//! - byte 2: motion bitmask or light switch
//! - bytes 3..9: zero

use std::fmt;

/// Output report length (including report ID).
pub const REPORT_LEN: usize = 9;

/// Command class selectors (byte 1).
pub mod class {
    /// Status query.
    pub const STATUS: u8 = 0x01;
    /// Turret motion and fire.
    pub const MOTION: u8 = 0x02;
    /// Light control.
    pub const LIGHT: u8 = 0x03;
}

/// Motion bitmask values (byte 2 when class is [`class::MOTION`]).
pub mod motion {
    pub const DOWN: u8 = 0x01;
    pub const UP: u8 = 0x02;
    pub const LEFT: u8 = 0x04;
    pub const RIGHT: u8 = 0x08;
    pub const FIRE: u8 = 0x10;
    pub const STOP: u8 = 0x20;
}

const fn packet(class: u8, arg: u8) -> [u8; REPORT_LEN] {
    [0x00, class, arg, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
}

/// Predefined output reports.
pub mod packets {
    use super::{class, motion, packet, REPORT_LEN};

    pub const UP: [u8; REPORT_LEN] = packet(class::MOTION, motion::UP);
    pub const DOWN: [u8; REPORT_LEN] = packet(class::MOTION, motion::DOWN);
    pub const LEFT: [u8; REPORT_LEN] = packet(class::MOTION, motion::LEFT);
    pub const RIGHT: [u8; REPORT_LEN] = packet(class::MOTION, motion::RIGHT);
    pub const FIRE: [u8; REPORT_LEN] = packet(class::MOTION, motion::FIRE);
    pub const STOP: [u8; REPORT_LEN] = packet(class::MOTION, motion::STOP);
    /// Status query. Defined by the device but never sent by the launcher.
    pub const GET_STATUS: [u8; REPORT_LEN] = packet(class::STATUS, 0x00);
    pub const LED_ON: [u8; REPORT_LEN] = packet(class::LIGHT, 0x01);
    pub const LED_OFF: [u8; REPORT_LEN] = packet(class::LIGHT, 0x00);
}

/// A launcher command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Stop,
    GetStatus,
    LedOn,
    LedOff,
}

impl Command {
    /// The output report for this command.
    pub fn report(&self) -> &'static [u8; REPORT_LEN] {
        match self {
            Self::Up => &packets::UP,
            Self::Down => &packets::DOWN,
            Self::Left => &packets::LEFT,
            Self::Right => &packets::RIGHT,
            Self::Fire => &packets::FIRE,
            Self::Stop => &packets::STOP,
            Self::GetStatus => &packets::GET_STATUS,
            Self::LedOn => &packets::LED_ON,
            Self::LedOff => &packets::LED_OFF,
        }
    }

    /// Short name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Fire => "fire",
            Self::Stop => "stop",
            Self::GetStatus => "get-status",
            Self::LedOn => "led-on",
            Self::LedOff => "led-off",
        }
    }

    /// Light command for the requested state.
    pub fn light(on: bool) -> Self {
        if on {
            Self::LedOn
        } else {
            Self::LedOff
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Turret travel direction for pulse moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions.
    pub const ALL: &'static [Direction] = &[
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Motion command that starts travel in this direction.
    pub fn command(&self) -> Command {
        match self {
            Self::Up => Command::Up,
            Self::Down => Command::Down,
            Self::Left => Command::Left,
            Self::Right => Command::Right,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }

    /// Parse a direction from a CLI-friendly string (case-insensitive).
    ///
    /// Accepts the full name or its first letter: "up"/"u", "down"/"d",
    /// "left"/"l", "right"/"r".
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "up" | "u" => Some(Self::Up),
            "down" | "d" => Some(Self::Down),
            "left" | "l" => Some(Self::Left),
            "right" | "r" => Some(Self::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
