//! Settings panel and the hidden hold gesture that unlocks technical mode.

use std::time::Instant;

use super::Ctx;
use crate::{
    config::Config,
    events::{Action, Route},
    focus::{FocusNavigator, NavConfig, NavError, NavOutcome},
    hold::HoldDetector,
};

/// A read-only settings card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Lines shown when the section is opened.
    pub details: Vec<String>,
}

fn sections(cfg: &Config) -> Vec<Section> {
    vec![
        Section {
            id: "screensaver",
            title: "Screensaver",
            description: "Slideshow and activation delay",
            details: vec![
                format!("Slide interval: {}s", cfg.slideshow.interval_secs),
                format!("Presentation slides: {}", cfg.presentation.slides.len()),
            ],
        },
        Section {
            id: "files",
            title: "Files Folder",
            description: "Default folder for files",
            details: vec!["Default folder: Storage".into()],
        },
        Section {
            id: "upload",
            title: "Upload Link",
            description: "Domain and QR code",
            details: vec!["Upload link: disabled in demo mode".into()],
        },
        Section {
            id: "mirroring",
            title: "Mirroring",
            description: "Screen casting settings",
            details: vec![
                format!("Device name: {}", cfg.device.name),
                format!("Initial PIN: {}", cfg.device.initial_pin),
            ],
        },
        Section {
            id: "visual",
            title: "Visual Customization",
            description: "Colors, themes and logo",
            details: vec![
                format!("Title: {}", cfg.hub.title),
                format!("Subtitle: {}", cfg.hub.subtitle),
            ],
        },
        Section {
            id: "security",
            title: "Security",
            description: "Passwords and access settings",
            details: vec![format!(
                "Hidden menu: hold for {}s",
                cfg.hidden.hold_secs
            )],
        },
    ]
}

pub struct SettingsScreen {
    sections: Vec<Section>,
    columns: usize,
    nav: FocusNavigator,
    open: Option<usize>,
    hold: HoldDetector,
}

impl SettingsScreen {
    pub fn mount(ctx: &Ctx) -> Result<Self, NavError> {
        let sections = sections(ctx.cfg);
        let columns = ctx.cfg.navigation.settings_columns;
        let nav = FocusNavigator::listening(
            NavConfig::grid(sections.len(), columns).throttle(ctx.cfg.throttle()),
            ctx.bus,
        )?;
        Ok(Self {
            sections,
            columns,
            nav,
            open: None,
            hold: HoldDetector::new(ctx.cfg.hold_threshold(), ctx.cfg.repeat_gap()),
        })
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn navigator(&self) -> &FocusNavigator {
        &self.nav
    }

    /// Section whose details are on display.
    pub fn open_section(&self) -> Option<&Section> {
        self.open.and_then(|i| self.sections.get(i))
    }

    pub fn pump(&mut self) -> Vec<Action> {
        let mut actions = vec![];
        for outcome in self.nav.pump() {
            match outcome {
                NavOutcome::Selected(index) => {
                    self.open = Some(index);
                    // Details are read-only; the grid sleeps until back.
                    self.nav.set_item_count(0);
                }
                NavOutcome::Back => match self.open.take() {
                    Some(index) => {
                        self.nav.set_item_count(self.sections.len());
                        self.nav.set_position(index);
                    }
                    None => actions.push(Action::Open(Route::Home)),
                },
                _ => {}
            }
        }
        actions
    }

    /// Hidden key pressed or repeated.
    pub fn hold_press(&mut self, now: Instant) -> Option<Action> {
        self.hold.press(now).then(unlock)
    }

    /// Hidden key released, when the terminal reports releases.
    pub fn hold_release(&mut self, now: Instant) -> Option<Action> {
        self.hold.release(now).then(unlock)
    }

    pub fn tick(&mut self, now: Instant) {
        self.hold.poll(now);
    }

    pub fn unmount(&mut self) {
        self.hold.reset();
        self.nav.destroy();
    }
}

fn unlock() -> Action {
    tracing::info!("technical mode unlocked");
    Action::Open(Route::Technical)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        focus::{Direction, NavInput},
        screens::testing::Fixture,
    };

    fn send(fx: &Fixture, s: &mut SettingsScreen, inputs: &[NavInput]) -> Vec<Action> {
        let mut actions = vec![];
        for input in inputs {
            fx.bus.publish(*input);
            actions.extend(s.pump());
        }
        actions
    }

    #[test]
    fn test_six_sections_in_two_columns() {
        let fx = Fixture::new();
        let mut s = SettingsScreen::mount(&fx.ctx()).unwrap();
        assert_eq!(s.sections().len(), 6);
        assert_eq!(s.columns(), 2);
        send(&fx, &mut s, &[NavInput::Move(Direction::Down), NavInput::Move(Direction::Right)]);
        assert_eq!(s.navigator().position(), Some(3));
        send(&fx, &mut s, &[NavInput::Move(Direction::Right)]);
        assert_eq!(s.navigator().position(), Some(2));
    }

    #[test]
    fn test_open_section_deactivates_grid_until_back() {
        let fx = Fixture::new();
        let mut s = SettingsScreen::mount(&fx.ctx()).unwrap();
        send(&fx, &mut s, &[NavInput::Move(Direction::Down), NavInput::Select]);
        assert_eq!(s.open_section().map(|sec| sec.id), Some("upload"));
        assert!(!s.navigator().is_active());

        // Arrows do nothing while the details are shown.
        send(&fx, &mut s, &[NavInput::Move(Direction::Down)]);
        assert!(send(&fx, &mut s, &[NavInput::Back]).is_empty());
        assert!(s.open_section().is_none());
        assert_eq!(s.navigator().position(), Some(2));

        assert_eq!(send(&fx, &mut s, &[NavInput::Back]), vec![Action::Open(Route::Home)]);
    }

    #[test]
    fn test_sections_reflect_config() {
        let mut fx = Fixture::new();
        fx.cfg.device.name = "Lobby".into();
        let s = SettingsScreen::mount(&fx.ctx()).unwrap();
        let mirroring = s.sections().iter().find(|sec| sec.id == "mirroring").unwrap();
        assert_eq!(mirroring.details[0], "Device name: Lobby");
    }

    #[test]
    fn test_hold_unlocks_technical() {
        let fx = Fixture::new();
        let mut s = SettingsScreen::mount(&fx.ctx()).unwrap();
        let t0 = Instant::now();
        let mut unlocked = vec![];
        for step in 0..=20 {
            unlocked.extend(s.hold_press(t0 + Duration::from_millis(step * 250)));
        }
        assert_eq!(unlocked, vec![Action::Open(Route::Technical)]);
    }

    #[test]
    fn test_short_hold_then_release_does_nothing() {
        let fx = Fixture::new();
        let mut s = SettingsScreen::mount(&fx.ctx()).unwrap();
        let t0 = Instant::now();
        assert!(s.hold_press(t0).is_none());
        assert!(s.hold_release(t0 + Duration::from_secs(2)).is_none());
    }

    #[test]
    fn test_abandoned_hold_restarts() {
        let fx = Fixture::new();
        let mut s = SettingsScreen::mount(&fx.ctx()).unwrap();
        let t0 = Instant::now();
        s.hold_press(t0);
        s.tick(t0 + Duration::from_secs(1));
        assert!(s.hold_press(t0 + Duration::from_secs(5)).is_none());
    }
}
