//! Home screen: logo between two side menus.

use super::Ctx;
use crate::{
    events::{Action, Route, Screen},
    focus::{Direction, FocusNavigator, NavConfig, NavError, NavOutcome},
};

/// One menu card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    /// Destination, or `None` for features that are not available yet.
    pub target: Option<Screen>,
}

pub const LEFT_MENU: [MenuEntry; 4] = [
    MenuEntry { label: "Explorer", target: Some(Screen::Explorer) },
    MenuEntry { label: "Gallery", target: Some(Screen::Gallery) },
    MenuEntry { label: "Cast", target: Some(Screen::Cast) },
    MenuEntry { label: "Agenda", target: None },
];

pub const RIGHT_MENU: [MenuEntry; 4] = [
    MenuEntry { label: "Presentation", target: Some(Screen::Presentation) },
    MenuEntry { label: "Notices", target: None },
    MenuEntry { label: "Contacts", target: None },
    MenuEntry { label: "Settings", target: Some(Screen::Settings) },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Both menus keep their own navigator; only the active one listens.
pub struct HomeScreen {
    left: FocusNavigator,
    right: FocusNavigator,
    active: Side,
}

impl HomeScreen {
    pub fn mount(ctx: &Ctx) -> Result<Self, NavError> {
        let menu = |len| NavConfig::linear(len).throttle(ctx.cfg.throttle()).without_back();
        Ok(Self {
            left: FocusNavigator::listening(menu(LEFT_MENU.len()), ctx.bus)?,
            right: FocusNavigator::new(menu(RIGHT_MENU.len()))?,
            active: Side::Left,
        })
    }

    pub fn active(&self) -> Side {
        self.active
    }

    pub fn navigator(&self, side: Side) -> &FocusNavigator {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn pump(&mut self, ctx: &Ctx) -> Vec<Action> {
        let outcomes = match self.active {
            Side::Left => self.left.pump(),
            Side::Right => self.right.pump(),
        };
        let mut actions = vec![];
        for outcome in outcomes {
            match (outcome, self.active) {
                (NavOutcome::Blocked(Direction::Right), Side::Left) => self.switch_to(Side::Right, ctx),
                (NavOutcome::Blocked(Direction::Left), Side::Right) => self.switch_to(Side::Left, ctx),
                (NavOutcome::Selected(index), side) => {
                    let menu: &[MenuEntry] = match side {
                        Side::Left => &LEFT_MENU,
                        Side::Right => &RIGHT_MENU,
                    };
                    if let Some(entry) = menu.get(index) {
                        actions.push(activate(entry));
                    }
                }
                _ => {}
            }
        }
        actions
    }

    /// Hand listening to the other menu, keeping the same row where possible.
    fn switch_to(&mut self, side: Side, ctx: &Ctx) {
        let (from, to) = match side {
            Side::Left => (&mut self.right, &mut self.left),
            Side::Right => (&mut self.left, &mut self.right),
        };
        from.unsubscribe();
        // Same row on the other side, and the move that got us here still
        // counts against the throttle.
        if let Some(row) = from.position() {
            to.set_position(row);
        }
        to.inherit_throttle(from);
        to.subscribe(ctx.bus);
        self.active = side;
        tracing::debug!(?side, "home menu switched");
    }

    pub fn unmount(&mut self) {
        self.left.destroy();
        self.right.destroy();
    }
}

fn activate(entry: &MenuEntry) -> Action {
    match entry.target {
        Some(screen) => Action::Open(route_for(screen)),
        None => Action::Notice(format!("{}: coming soon in a future update.", entry.label)),
    }
}

fn route_for(screen: Screen) -> Route {
    match screen {
        Screen::Home => Route::Home,
        Screen::Explorer => Route::Explorer { path: vec![] },
        Screen::Gallery => Route::Gallery { opened: None },
        Screen::Cast => Route::Cast,
        Screen::Presentation => Route::Presentation,
        Screen::Settings => Route::Settings,
        Screen::Technical => Route::Technical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    use crate::{focus::NavInput, screens::testing::Fixture};

    fn send(fx: &Fixture, home: &mut HomeScreen, inputs: &[NavInput]) -> Vec<Action> {
        let mut actions = vec![];
        for input in inputs {
            fx.bus.publish(*input);
            actions.extend(home.pump(&fx.ctx()));
        }
        actions
    }

    #[test]
    fn test_select_opens_menu_target() {
        let fx = Fixture::new();
        let mut home = HomeScreen::mount(&fx.ctx()).unwrap();
        let actions = send(&fx, &mut home, &[NavInput::Move(Direction::Down), NavInput::Select]);
        assert_eq!(actions, vec![Action::Open(Route::Gallery { opened: None })]);
    }

    #[test]
    fn test_unavailable_item_yields_notice() {
        let fx = Fixture::new();
        let mut home = HomeScreen::mount(&fx.ctx()).unwrap();
        let actions = send(&fx, &mut home, &[NavInput::Move(Direction::Up), NavInput::Select]);
        assert!(matches!(&actions[..], [Action::Notice(msg)] if msg.starts_with("Agenda")));
    }

    #[test]
    fn test_right_moves_focus_to_other_menu_on_same_row() {
        let fx = Fixture::new();
        let mut home = HomeScreen::mount(&fx.ctx()).unwrap();
        send(
            &fx,
            &mut home,
            &[
                NavInput::Move(Direction::Down),
                NavInput::Move(Direction::Down),
                NavInput::Move(Direction::Down),
                NavInput::Move(Direction::Right),
            ],
        );
        assert_eq!(home.active(), Side::Right);
        assert!(!home.navigator(Side::Left).is_listening());
        assert_eq!(home.navigator(Side::Right).position(), Some(3));

        let actions = send(&fx, &mut home, &[NavInput::Select]);
        assert_eq!(actions, vec![Action::Open(Route::Settings)]);

        send(&fx, &mut home, &[NavInput::Move(Direction::Left)]);
        assert_eq!(home.active(), Side::Left);
        assert_eq!(fx.bus.subscriber_count(), 1);
    }

    #[test]
    fn test_menu_handoff_keeps_throttle_window() {
        let mut fx = Fixture::new();
        fx.cfg.navigation.throttle_ms = 100;
        let mut home = HomeScreen::mount(&fx.ctx()).unwrap();
        let t0 = Instant::now();

        fx.bus.publish_at(NavInput::Move(Direction::Right), t0);
        home.pump(&fx.ctx());
        assert_eq!(home.active(), Side::Right);

        fx.bus.publish_at(NavInput::Move(Direction::Down), t0 + Duration::from_millis(10));
        home.pump(&fx.ctx());
        assert_eq!(home.navigator(Side::Right).position(), Some(0));

        fx.bus.publish_at(NavInput::Move(Direction::Down), t0 + Duration::from_millis(100));
        home.pump(&fx.ctx());
        assert_eq!(home.navigator(Side::Right).position(), Some(1));
    }

    #[test]
    fn test_back_is_not_bound_on_home() {
        let fx = Fixture::new();
        let mut home = HomeScreen::mount(&fx.ctx()).unwrap();
        assert!(send(&fx, &mut home, &[NavInput::Back]).is_empty());
    }
}
