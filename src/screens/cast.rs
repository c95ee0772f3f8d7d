//! Cast screen: device identity, PIN and a single "new PIN" button.

use super::Ctx;
use crate::{
    events::{Action, Route},
    focus::{FocusNavigator, NavConfig, NavError, NavOutcome},
};

/// Steps shown under the PIN.
pub const INSTRUCTIONS: [&str; 3] = [
    "Open the screen mirroring option on your device",
    "Pick this hub from the list",
    "Enter the PIN shown here",
];

pub struct CastScreen {
    nav: FocusNavigator,
}

impl CastScreen {
    pub fn mount(ctx: &Ctx) -> Result<Self, NavError> {
        let nav = FocusNavigator::listening(
            NavConfig::linear(1).throttle(ctx.cfg.throttle()),
            ctx.bus,
        )?;
        Ok(Self { nav })
    }

    pub fn navigator(&self) -> &FocusNavigator {
        &self.nav
    }

    pub fn pump(&mut self) -> Vec<Action> {
        let mut actions = vec![];
        for outcome in self.nav.pump() {
            match outcome {
                NavOutcome::Selected(_) => actions.push(Action::RequestPin),
                NavOutcome::Back => {
                    actions.push(Action::Open(Route::Home));
                    break;
                }
                _ => {}
            }
        }
        actions
    }

    pub fn unmount(&mut self) {
        self.nav.destroy();
    }
}
