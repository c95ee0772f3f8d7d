//! Event loop, key routing and application state.

mod handlers;
mod render;

use anyhow::Result;
use crossterm::event::{self, Event};
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::{
    bus::InputBus,
    config::Config,
    events::{Action, Route, Screen, UiState},
    library::MockLibrary,
    screens::{Ctx, ScreenState},
    shortcuts::Shortcuts,
    ui::Tui,
    worker::{self, DeviceCmd, DeviceEvent, SystemInfo},
};

use handlers::{handle_key, is_ctrl_c};
use render::draw;

/// Worker log lines kept for the technical screen.
const LOG_CAPACITY: usize = 50;

/// What the device worker last told us.
#[derive(Clone, Debug)]
pub struct DeviceState {
    /// PIN shown on the cast screen.
    pub pin: String,
    /// Cast session, once a PIN was issued.
    pub session: Option<Uuid>,
    /// A regeneration request is in flight.
    pub pin_pending: bool,
    /// Last status snapshot.
    pub info: Option<SystemInfo>,
}

/// App state shared by input handling and rendering.
pub struct App {
    pub cfg: Config,
    pub shortcuts: Shortcuts,
    /// Mocked folder and media providers.
    pub library: MockLibrary,
    /// Navigation inputs; every listening navigator holds a receiver.
    pub bus: InputBus,
    /// Mounted screen.
    pub view: ScreenState,
    pub ui: UiState,
    pub device: DeviceState,
    pub device_tx: mpsc::Sender<DeviceCmd>,
    pub device_rx: mpsc::Receiver<DeviceEvent>,
}

impl App {
    /// Build the app with the home screen mounted.
    pub fn new(
        cfg: Config,
        shortcuts: Shortcuts,
        library: MockLibrary,
        device_tx: mpsc::Sender<DeviceCmd>,
        device_rx: mpsc::Receiver<DeviceEvent>,
    ) -> Result<Self> {
        let bus = InputBus::default();
        let ctx = Ctx {
            cfg: &cfg,
            bus: &bus,
            folders: &library,
            media: &library,
        };
        let (view, _) = ScreenState::mount(Route::Home, &ctx)?;
        let device = DeviceState {
            pin: cfg.device.initial_pin.clone(),
            session: None,
            pin_pending: false,
            info: None,
        };
        Ok(Self {
            cfg,
            shortcuts,
            library,
            bus,
            view,
            ui: UiState {
                status: Screen::Home.title().into(),
                ..UiState::default()
            },
            device,
            device_tx,
            device_rx,
        })
    }

    pub fn screen(&self) -> Screen {
        self.view.screen()
    }

    /// Mount `route` and tear down the previous screen. On failure the
    /// current screen stays and the error is shown.
    pub async fn navigate(&mut self, route: Route) -> Result<()> {
        let target = route.screen();
        let ctx = Ctx {
            cfg: &self.cfg,
            bus: &self.bus,
            folders: &self.library,
            media: &self.library,
        };
        let (next, notices) = match ScreenState::mount(route, &ctx) {
            Ok(mounted) => mounted,
            Err(e) => {
                tracing::error!(screen = ?target, "mount failed: {e}");
                self.ui.error = Some(format!("Cannot open {}: {e}", target.title()));
                return Ok(());
            }
        };
        // Next screen is live, drop the old listeners.
        let mut prev = std::mem::replace(&mut self.view, next);
        prev.unmount();

        self.ui.error = None;
        self.ui.status = target.title().into();
        // Mount-time notices replace the title.
        for notice in notices {
            if let Action::Notice(text) = notice {
                self.ui.status = text;
            }
        }

        // Technical screen shows a fresh snapshot.
        if target == Screen::Technical {
            self.device_tx.send(DeviceCmd::QueryStatus).await?;
        }
        Ok(())
    }

    /// Apply one screen action. Returns `true` when the app should exit.
    pub async fn apply(&mut self, action: Action) -> Result<bool> {
        match action {
            Action::Open(route) => self.navigate(route).await?,
            Action::Notice(text) => {
                tracing::info!("notice: {text}");
                self.ui.status = text;
            }
            Action::RequestPin => {
                if !self.device.pin_pending {
                    self.device.pin_pending = true;
                    self.device_tx.send(DeviceCmd::RegeneratePin).await?;
                }
                self.ui.status = "Requesting a new PIN...".into();
            }
            Action::Restart => {
                tracing::info!("restart requested from technical mode");
                self.device_tx.send(DeviceCmd::MarkRestart).await?;
                self.navigate(Route::Home).await?;
                self.ui.status = "Restarted".into();
            }
            Action::Quit => return Ok(true),
        }
        Ok(false)
    }

    /// Let the mounted screen drain the bus and apply what it asks for.
    pub async fn pump(&mut self) -> Result<bool> {
        let ctx = Ctx {
            cfg: &self.cfg,
            bus: &self.bus,
            folders: &self.library,
            media: &self.library,
        };
        // Screen errors are shown, never fatal.
        let actions = match self.view.pump(&ctx) {
            Ok(actions) => actions,
            Err(e) => {
                tracing::error!("navigation failed: {e}");
                self.ui.error = Some(e.to_string());
                return Ok(false);
            }
        };
        // Stop at the first action that ends the app.
        for action in actions {
            if self.apply(action).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Reflect a worker event in the UI state.
    pub fn handle_device_event(&mut self, ev: DeviceEvent) {
        match ev {
            DeviceEvent::PinIssued { pin, session } => {
                self.ui.status = format!("New PIN: {pin}");
                self.device.pin = pin;
                self.device.session = Some(session);
                self.device.pin_pending = false;
            }
            DeviceEvent::Status(info) => self.device.info = Some(info),
            DeviceEvent::Log(line) => {
                self.ui.log.push(line);
                if self.ui.log.len() > LOG_CAPACITY {
                    self.ui.log.remove(0);
                }
            }
        }
    }

    /// Time-driven screen updates.
    pub fn tick(&mut self, now: Instant) {
        self.view.tick(now);
    }
}

/// Run the main TUI loop until the user quits.
pub async fn run_app(terminal: &mut Tui) -> Result<()> {
    // Config is created with defaults on first start.
    let cfg_path = PathBuf::from("config.toml");
    let cfg = Config::load_or_default(&cfg_path)?;

    let shortcuts_path = PathBuf::from("shortcut.toml");
    let shortcuts = Shortcuts::load_or_default(&shortcuts_path)?;

    let library = MockLibrary::load()?;

    let (tx_cmd, rx_cmd) = mpsc::channel::<DeviceCmd>(64);
    let (tx_ev, rx_ev) = mpsc::channel::<DeviceEvent>(256);
    tokio::spawn(worker::run(rx_cmd, tx_ev, cfg.device.clone()));

    let mut app = App::new(cfg, shortcuts, library, tx_cmd, rx_ev)?;

    loop {
        terminal.draw(|f| draw(f, &app))?;

        // Drain worker events without blocking.
        while let Ok(ev) = app.device_rx.try_recv() {
            app.handle_device_event(ev);
        }

        // Autoplay and the hold gesture.
        app.tick(Instant::now());

        // Short poll keeps autoplay and worker updates flowing.
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(k) = event::read()?
        {
            if is_ctrl_c(&k) {
                break;
            }
            if handle_key(&mut app, k).await? {
                break;
            }
        }
    }
    app.view.unmount();
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// App with a zero-latency worker and no throttling.
    pub fn app() -> App {
        let mut cfg = Config::default();
        cfg.navigation.throttle_ms = 0;
        cfg.device.latency_ms = 0;
        let (tx_cmd, rx_cmd) = mpsc::channel(16);
        let (tx_ev, rx_ev) = mpsc::channel(16);
        tokio::spawn(worker::run(rx_cmd, tx_ev, cfg.device.clone()));
        App::new(
            cfg,
            Shortcuts::default(),
            MockLibrary::load().unwrap(),
            tx_cmd,
            rx_ev,
        )
        .unwrap()
    }
}
