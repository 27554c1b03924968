//! missile-commander CLI: command-line launcher control and overlay mapping.

use anyhow::Result;
use clap::{Parser, Subcommand};
use missile_commander_core::command::Direction;
use missile_commander_core::device::DeviceInfo;
use missile_commander_core::geometry::{letterbox_rect, map_face_box_to_ui, FaceBox};
use missile_commander_core::launcher::Launcher;
use missile_commander_core::settings;

#[derive(Parser)]
#[command(
    name = "missile-commander",
    version,
    about = "USB missile launcher control"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List connected launchers.
    ListDevices,
    /// Move the turret for a fixed time, then stop.
    Move {
        /// Direction: up, down, left, right (or u, d, l, r).
        direction: String,
        /// Pulse duration in milliseconds (defaults to the saved setting).
        #[arg(long)]
        ms: Option<u64>,
    },
    /// Fire one missile.
    Fire,
    /// Switch the launcher light.
    Light {
        /// on or off.
        state: String,
    },
    /// Map a face box from stream pixels to preview coordinates.
    MapFace {
        #[arg(long)]
        stream_width: u32,
        #[arg(long)]
        stream_height: u32,
        #[arg(long)]
        control_width: f64,
        #[arg(long)]
        control_height: f64,
        #[arg(long)]
        x: u32,
        #[arg(long)]
        y: u32,
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
    },
    /// Show the settings file location and effective values.
    Settings,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ListDevices => {
            let devices = missile_commander_core::device::discover_devices()?;
            if devices.is_empty() {
                println!("No launchers found.");
                println!("Ensure the launcher is plugged in and accessible to your user.");
            } else {
                for dev in &devices {
                    println!("{}", describe_device(dev));
                }
            }
        }
        Commands::Move { direction, ms } => {
            let parsed = Direction::from_name(&direction).ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown direction '{}'. Valid directions: up, down, left, right",
                    direction
                )
            })?;
            let duration = match ms {
                Some(ms) => settings::validate_pulse_ms(ms)?,
                None => settings::load_settings()?.pulse_ms,
            };
            tracing::debug!(direction = %parsed, duration_ms = duration, "Pulse requested");
            let launcher = connect()?;
            launcher.move_direction(parsed, duration).await?;
            if launcher.is_connected() {
                println!("Moved {} for {duration} ms", parsed.label().to_lowercase());
            }
        }
        Commands::Fire => {
            let launcher = connect()?;
            launcher.fire()?;
            if launcher.is_connected() {
                println!("Fired");
            }
        }
        Commands::Light { state } => {
            let on = parse_switch(&state).ok_or_else(|| {
                anyhow::anyhow!("Unknown light state '{}'. Use on or off", state)
            })?;
            let launcher = connect()?;
            launcher.set_light(on)?;
            if launcher.is_connected() {
                println!("Light {}", if on { "on" } else { "off" });
            }
        }
        Commands::MapFace {
            stream_width,
            stream_height,
            control_width,
            control_height,
            x,
            y,
            width,
            height,
        } => {
            let letterbox =
                letterbox_rect(stream_width, stream_height, control_width, control_height);
            let face = FaceBox::new(x, y, width, height);
            let ui = map_face_box_to_ui(&face, stream_width, stream_height, &letterbox);
            tracing::debug!(?letterbox, ?ui, "Face mapped");
            let out = serde_json::json!({
                "letterbox": letterbox,
                "face": ui,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Settings => {
            let path = settings::settings_path()?;
            let current = settings::load_settings_from(&path)?;
            println!("Settings file: {}", path.display());
            println!("  Pulse: {} ms", current.pulse_ms);
            println!("  Light on connect: {}", current.light_on_connect);
        }
    }

    Ok(())
}

/// Connect to the first launcher, telling the user when none is attached.
fn connect() -> Result<Launcher> {
    let launcher = Launcher::connect()?;
    if !launcher.is_connected() {
        tracing::info!("No launcher attached");
        println!("No launcher connected; command ignored.");
    }
    Ok(launcher)
}

fn describe_device(dev: &DeviceInfo) -> String {
    format!(
        "Launcher (VID: 0x{:04X}, PID: 0x{:04X}, usage: 0x{:02X}/0x{:02X}, serial: {}, path: {})",
        dev.vid,
        dev.pid,
        dev.usage_page,
        dev.usage,
        dev.serial.as_deref().unwrap_or("none"),
        dev.path
    )
}

fn parse_switch(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "on" | "true" | "1" => Some(true),
        "off" | "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_switch_accepts_variants() {
        assert_eq!(parse_switch("on"), Some(true));
        assert_eq!(parse_switch("OFF"), Some(false));
        assert_eq!(parse_switch(" 1 "), Some(true));
        assert_eq!(parse_switch("blink"), None);
    }

    #[test]
    fn describe_device_includes_serial() {
        let mut dev = DeviceInfo {
            vid: 0x2123,
            pid: 0x1010,
            usage_page: 0x01,
            usage: 0x10,
            path: "/dev/hidraw3".to_string(),
            serial: Some("LX-0042".to_string()),
        };
        let line = describe_device(&dev);
        assert!(line.contains("VID: 0x2123"));
        assert!(line.contains("serial: LX-0042"));
        assert!(line.contains("path: /dev/hidraw3"));

        dev.serial = None;
        assert!(describe_device(&dev).contains("serial: none"));
    }

    #[test]
    fn cli_parses_move_with_duration() {
        let cli = Cli::try_parse_from(["missile-commander", "move", "up", "--ms", "250"]).unwrap();
        match cli.command {
            Commands::Move { direction, ms } => {
                assert_eq!(direction, "up");
                assert_eq!(ms, Some(250));
            }
            _ => panic!("expected move"),
        }
    }

    #[test]
    fn cli_parses_map_face() {
        let cli = Cli::try_parse_from([
            "missile-commander",
            "map-face",
            "--stream-width",
            "1280",
            "--stream-height",
            "720",
            "--control-width",
            "800",
            "--control-height",
            "600",
            "--x",
            "100",
            "--y",
            "50",
            "--width",
            "40",
            "--height",
            "40",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::MapFace { x: 100, .. }));
    }
}
