//! Per-screen state. Every screen owns its navigators and destroys them on
//! unmount; inputs reach them only through their own bus subscriptions.

mod cast;
mod explorer;
mod gallery;
mod home;
mod presentation;
mod settings;
mod technical;

pub use cast::{CastScreen, INSTRUCTIONS};
pub use explorer::ExplorerScreen;
pub use gallery::{GalleryScreen, ViewerMode};
pub use home::{HomeScreen, LEFT_MENU, MenuEntry, RIGHT_MENU, Side};
pub use presentation::PresentationScreen;
pub use settings::SettingsScreen;
pub use technical::{TECHNICAL_ACTIONS, TechnicalScreen};

use std::time::Instant;

use crate::{
    bus::InputBus,
    config::Config,
    events::{Action, Route, Screen},
    focus::NavError,
    library::{FolderSource, MediaSource},
};

/// Everything a screen may read while mounting or handling input.
pub struct Ctx<'a> {
    pub cfg: &'a Config,
    pub bus: &'a InputBus,
    pub folders: &'a dyn FolderSource,
    pub media: &'a dyn MediaSource,
}

/// The mounted screen.
pub enum ScreenState {
    Home(HomeScreen),
    Explorer(ExplorerScreen),
    Gallery(GalleryScreen),
    Cast(CastScreen),
    Presentation(PresentationScreen),
    Settings(SettingsScreen),
    Technical(TechnicalScreen),
}

impl ScreenState {
    /// Build the screen for `route`. Notices raised while mounting (such as
    /// an unknown explorer path) are returned alongside.
    pub fn mount(route: Route, ctx: &Ctx) -> Result<(Self, Vec<Action>), NavError> {
        let mut notices = vec![];
        let state = match route {
            Route::Home => ScreenState::Home(HomeScreen::mount(ctx)?),
            Route::Explorer { path } => {
                let (screen, notice) = ExplorerScreen::mount(path, ctx)?;
                notices.extend(notice);
                ScreenState::Explorer(screen)
            }
            Route::Gallery { opened } => ScreenState::Gallery(GalleryScreen::mount(opened, ctx)?),
            Route::Cast => ScreenState::Cast(CastScreen::mount(ctx)?),
            Route::Presentation => ScreenState::Presentation(PresentationScreen::mount(ctx)?),
            Route::Settings => ScreenState::Settings(SettingsScreen::mount(ctx)?),
            Route::Technical => ScreenState::Technical(TechnicalScreen::mount(ctx)?),
        };
        tracing::info!(screen = ?state.screen(), "screen mounted");
        Ok((state, notices))
    }

    pub fn screen(&self) -> Screen {
        match self {
            ScreenState::Home(_) => Screen::Home,
            ScreenState::Explorer(_) => Screen::Explorer,
            ScreenState::Gallery(_) => Screen::Gallery,
            ScreenState::Cast(_) => Screen::Cast,
            ScreenState::Presentation(_) => Screen::Presentation,
            ScreenState::Settings(_) => Screen::Settings,
            ScreenState::Technical(_) => Screen::Technical,
        }
    }

    /// Let the screen's listening navigators drain the bus.
    pub fn pump(&mut self, ctx: &Ctx) -> Result<Vec<Action>, NavError> {
        match self {
            ScreenState::Home(s) => Ok(s.pump(ctx)),
            ScreenState::Explorer(s) => s.pump(ctx),
            ScreenState::Gallery(s) => s.pump(ctx),
            ScreenState::Cast(s) => Ok(s.pump()),
            ScreenState::Presentation(s) => s.pump(ctx),
            ScreenState::Settings(s) => Ok(s.pump()),
            ScreenState::Technical(s) => Ok(s.pump()),
        }
    }

    /// Time-driven updates (slideshow autoplay, abandoned holds).
    pub fn tick(&mut self, now: Instant) {
        match self {
            ScreenState::Gallery(s) => s.tick(now),
            ScreenState::Settings(s) => s.tick(now),
            _ => {}
        }
    }

    /// Destroy every navigator the screen owns.
    pub fn unmount(&mut self) {
        match self {
            ScreenState::Home(s) => s.unmount(),
            ScreenState::Explorer(s) => s.unmount(),
            ScreenState::Gallery(s) => s.unmount(),
            ScreenState::Cast(s) => s.unmount(),
            ScreenState::Presentation(s) => s.unmount(),
            ScreenState::Settings(s) => s.unmount(),
            ScreenState::Technical(s) => s.unmount(),
        }
    }
}
