//! Hidden technical mode.

use super::Ctx;
use crate::{
    events::{Action, Route},
    focus::{FocusNavigator, NavConfig, NavError, NavOutcome},
};

pub const TECHNICAL_ACTIONS: [&str; 2] = ["Restart App", "Close App"];

pub struct TechnicalScreen {
    nav: FocusNavigator,
}

impl TechnicalScreen {
    pub fn mount(ctx: &Ctx) -> Result<Self, NavError> {
        let nav = FocusNavigator::listening(
            NavConfig::linear(TECHNICAL_ACTIONS.len()).throttle(ctx.cfg.throttle()),
            ctx.bus,
        )?;
        Ok(Self { nav })
    }

    pub fn navigator(&self) -> &FocusNavigator {
        &self.nav
    }

    pub fn pump(&mut self) -> Vec<Action> {
        for outcome in self.nav.pump() {
            let action = match outcome {
                NavOutcome::Selected(0) => Action::Restart,
                NavOutcome::Selected(_) => Action::Quit,
                NavOutcome::Back => Action::Open(Route::Settings),
                _ => continue,
            };
            return vec![action];
        }
        vec![]
    }

    pub fn unmount(&mut self) {
        self.nav.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        focus::{Direction, NavInput},
        screens::testing::Fixture,
    };

    #[test]
    fn test_actions_by_position() {
        let fx = Fixture::new();
        let mut tech = TechnicalScreen::mount(&fx.ctx()).unwrap();
        fx.bus.publish(NavInput::Select);
        assert_eq!(tech.pump(), vec![Action::Restart]);

        fx.bus.publish(NavInput::Move(Direction::Up));
        fx.bus.publish(NavInput::Select);
        assert_eq!(tech.pump(), vec![Action::Quit]);
    }

    #[test]
    fn test_back_returns_to_settings() {
        let fx = Fixture::new();
        let mut tech = TechnicalScreen::mount(&fx.ctx()).unwrap();
        fx.bus.publish(NavInput::Back);
        assert_eq!(tech.pump(), vec![Action::Open(Route::Settings)]);
    }
}
