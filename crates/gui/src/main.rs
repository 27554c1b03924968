//! missile-commander GUI: iced-based control panel for the launcher.

use iced::widget::{button, column, container, row, slider, text, toggler};
use iced::{Element, Length, Task as IcedTask, Theme};
use std::sync::Arc;

use missile_commander_core::command::Direction;
use missile_commander_core::launcher::Launcher;
use missile_commander_core::settings::{self, Settings, PULSE_MS_MAX};

/// Slider granularity for the pulse duration.
const PULSE_STEP_MS: u64 = 50;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    iced::application("Missile Commander", App::update, App::view)
        .theme(|_| Theme::Dark)
        .run_with(App::new)
}

/// Application state.
struct App {
    launcher: Arc<Launcher>,
    pulse_ms: u64,
    light_on: bool,
    light_on_connect: bool,
    status: String,
}

#[derive(Debug, Clone)]
enum Message {
    Move(Direction),
    PulseChanged(u64),
    Fire,
    LightToggled(bool),
    LightOnConnectToggled(bool),
    CommandFinished(Result<(), String>),
    SaveSettings,
}

impl App {
    fn new() -> (Self, IcedTask<Message>) {
        let settings = match settings::load_settings() {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("Using default settings: {e}");
                Settings::default()
            }
        };

        let (launcher, mut status) = match Launcher::connect() {
            Ok(launcher) if launcher.is_connected() => {
                (launcher, "Launcher connected.".to_string())
            }
            Ok(launcher) => (launcher, "No launcher found. Controls are inactive.".to_string()),
            Err(e) => (Launcher::unbound(), format!("Connection error: {e}")),
        };

        let mut light_on = false;
        if settings.light_on_connect && launcher.is_connected() {
            match launcher.set_light(true) {
                Ok(()) => light_on = true,
                Err(e) => status = format!("Light error: {e}"),
            }
        }

        let app = Self {
            launcher: Arc::new(launcher),
            pulse_ms: settings.pulse_ms,
            light_on,
            light_on_connect: settings.light_on_connect,
            status,
        };
        (app, IcedTask::none())
    }

    fn update(&mut self, message: Message) -> IcedTask<Message> {
        match message {
            Message::Move(direction) => {
                let launcher = Arc::clone(&self.launcher);
                let duration = self.pulse_ms;
                self.status = format!("Moving {} for {duration} ms", direction.label());
                return IcedTask::perform(
                    async move {
                        launcher
                            .move_direction(direction, duration)
                            .await
                            .map_err(|e| e.to_string())
                    },
                    Message::CommandFinished,
                );
            }
            Message::PulseChanged(ms) => {
                if let Ok(validated) = settings::validate_pulse_ms(ms) {
                    self.pulse_ms = validated;
                }
            }
            Message::Fire => match self.launcher.fire() {
                Ok(()) => self.status = "Fired.".into(),
                Err(e) => self.status = format!("Fire error: {e}"),
            },
            Message::LightToggled(_) if !self.launcher.is_connected() => {
                self.status = "No launcher connected; light unchanged.".into();
            }
            Message::LightToggled(on) => match self.launcher.set_light(on) {
                Ok(()) => {
                    self.light_on = on;
                    self.status = format!("Light {}.", if on { "on" } else { "off" });
                }
                Err(e) => self.status = format!("Light error: {e}"),
            },
            Message::LightOnConnectToggled(on) => {
                self.light_on_connect = on;
            }
            Message::CommandFinished(Ok(())) => {
                self.status = "Ready.".into();
            }
            Message::CommandFinished(Err(e)) => {
                self.status = format!("Move error: {e}");
            }
            Message::SaveSettings => {
                match settings::save_settings(&self.settings()) {
                    Ok(()) => self.status = "Settings saved.".into(),
                    Err(e) => self.status = format!("Save error: {e}"),
                }
            }
        }
        IcedTask::none()
    }

    /// Preferences as they would be saved.
    fn settings(&self) -> Settings {
        Settings {
            pulse_ms: self.pulse_ms,
            light_on_connect: self.light_on_connect,
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let connected = self.launcher.is_connected();
        let status_icon = if connected { "[OK]" } else { "[--]" };
        let status_text = if connected {
            "Launcher connected"
        } else {
            "Launcher disconnected"
        };

        let header = column![
            text("Missile Commander").size(34),
            text("Aim and fire the USB missile launcher").size(16),
        ]
        .spacing(4);

        let device_card = container(
            column![
                text("Device").size(20),
                text(format!("{status_icon} {status_text}")).size(16),
                text(&self.status).size(14),
            ]
            .spacing(8),
        )
        .padding(14)
        .width(Length::Fill);

        let move_button = |direction: Direction| {
            button(text(direction.label()))
                .width(Length::Fixed(80.0))
                .on_press(Message::Move(direction))
        };

        let pad = column![
            move_button(Direction::Up),
            row![move_button(Direction::Left), move_button(Direction::Right)].spacing(90),
            move_button(Direction::Down),
        ]
        .spacing(10)
        .align_x(iced::alignment::Horizontal::Center);

        let turret_card = container(
            column![
                text("Turret").size(20),
                pad,
                text(format!("Pulse: {} ms", self.pulse_ms)).size(16),
                slider(
                    (PULSE_STEP_MS as f64)..=(PULSE_MS_MAX as f64),
                    self.pulse_ms as f64,
                    |val| Message::PulseChanged(val as u64),
                )
                .step(PULSE_STEP_MS as f64),
            ]
            .spacing(10),
        )
        .padding(14)
        .width(Length::Fill);

        let actions = row![
            button("Fire").on_press(Message::Fire),
            toggler(self.light_on)
                .label("Light")
                .on_toggle(Message::LightToggled),
            toggler(self.light_on_connect)
                .label("Light on connect")
                .on_toggle(Message::LightOnConnectToggled),
            button("Save Settings").on_press(Message::SaveSettings),
        ]
        .spacing(12);

        let content = column![header, device_card, turret_card, actions]
            .spacing(14)
            .padding(20)
            .max_width(640);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }
}
