//! Directional focus navigation shared by every screen.
//!
//! A [`FocusNavigator`] owns one focus position over a collection of
//! `item_count` items arranged as a list, a grid or a carousel. Inputs come
//! either directly through the `handle_*` methods or from the navigator's own
//! [`InputBus`] subscription via [`FocusNavigator::pump`]. Nothing is invoked
//! on the caller's behalf: every input yields a [`NavOutcome`] and the screen
//! decides what to do with it.

use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::bus::{InputBus, InputEvent};

/// Minimum spacing between accepted directional inputs.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(100);

/// Arrow / D-pad direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Symbolic input, already abstracted from raw key codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavInput {
    /// Directional move.
    Move(Direction),
    /// OK / Enter.
    Select,
    /// Back / Escape.
    Back,
}

/// Arrangement of the focusable items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    /// Vertical list; Left/Right have no effect.
    Linear,
    /// Row-major grid with a fixed column count.
    Grid { columns: usize },
    /// One item at a time; Down/Right advance, Up/Left go back.
    Carousel,
}

/// Construction errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// Grid topology with zero columns.
    #[error("grid topology needs at least one column, got {columns}")]
    InvalidTopology { columns: usize },
}

/// Result of feeding one input to a navigator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    /// Focus moved.
    Moved { from: usize, to: usize },
    /// Input was accepted but the position stayed put (edge without wrap,
    /// or an axis the topology does not have).
    Blocked(Direction),
    /// Directional input arrived inside the throttle window and was dropped.
    Throttled,
    /// Select on the focused item.
    Selected(usize),
    /// Back was requested.
    Back,
    /// Nothing happened: inactive, destroyed, or the action is not bound.
    Ignored,
}

/// Per-instance navigator configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavConfig {
    /// Number of focusable items.
    pub item_count: usize,
    /// Movement arithmetic.
    pub topology: Topology,
    /// Whether moving past an edge re-enters from the opposite edge.
    pub wrap: bool,
    /// Focus used on creation and when the navigator becomes active again.
    pub initial_position: usize,
    /// Throttle window for directional inputs.
    pub throttle: Duration,
    /// Report `Selected` for select inputs.
    pub select_bound: bool,
    /// Report `Back` for back inputs.
    pub back_bound: bool,
}

impl NavConfig {
    /// Wrapping vertical list.
    pub fn linear(item_count: usize) -> Self {
        Self::with_topology(item_count, Topology::Linear)
    }

    /// Wrapping grid with `columns` columns.
    pub fn grid(item_count: usize, columns: usize) -> Self {
        Self::with_topology(item_count, Topology::Grid { columns })
    }

    /// Wrapping carousel.
    pub fn carousel(item_count: usize) -> Self {
        Self::with_topology(item_count, Topology::Carousel)
    }

    fn with_topology(item_count: usize, topology: Topology) -> Self {
        Self {
            item_count,
            topology,
            wrap: true,
            initial_position: 0,
            throttle: DEFAULT_THROTTLE,
            select_bound: true,
            back_bound: true,
        }
    }

    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn initial(mut self, position: usize) -> Self {
        self.initial_position = position;
        self
    }

    pub fn throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn without_select(mut self) -> Self {
        self.select_bound = false;
        self
    }

    pub fn without_back(mut self) -> Self {
        self.back_bound = false;
        self
    }
}

/// Focus state machine for one navigable collection.
///
/// States are Inactive (`item_count == 0`, no position) and Active. Once
/// [`destroy`](Self::destroy) has been called the navigator is inert.
#[derive(Debug)]
pub struct FocusNavigator {
    item_count: usize,
    topology: Topology,
    wrap: bool,
    initial_position: usize,
    throttle: Duration,
    select_bound: bool,
    back_bound: bool,
    position: Option<usize>,
    last_accepted: Option<Instant>,
    subscription: Option<broadcast::Receiver<InputEvent>>,
    destroyed: bool,
}

impl FocusNavigator {
    /// Build a navigator. The initial position is clamped into range.
    pub fn new(config: NavConfig) -> Result<Self, NavError> {
        if let Topology::Grid { columns } = config.topology
            && columns == 0
        {
            return Err(NavError::InvalidTopology { columns });
        }
        let position = clamp(config.initial_position, config.item_count);
        Ok(Self {
            item_count: config.item_count,
            topology: config.topology,
            wrap: config.wrap,
            initial_position: config.initial_position,
            throttle: config.throttle,
            select_bound: config.select_bound,
            back_bound: config.back_bound,
            position,
            last_accepted: None,
            subscription: None,
            destroyed: false,
        })
    }

    /// Build a navigator that is already listening on `bus`.
    pub fn listening(config: NavConfig, bus: &InputBus) -> Result<Self, NavError> {
        let mut nav = Self::new(config)?;
        nav.subscribe(bus);
        Ok(nav)
    }

    /// Focused index, `None` while inactive or destroyed.
    pub fn position(&self) -> Option<usize> {
        if self.destroyed { None } else { self.position }
    }

    /// Whether `index` is the focused item.
    pub fn is_focused(&self, index: usize) -> bool {
        self.position() == Some(index)
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Active means at least one item and not destroyed.
    pub fn is_active(&self) -> bool {
        !self.destroyed && self.position.is_some()
    }

    pub fn is_listening(&self) -> bool {
        self.subscription.is_some()
    }

    #[allow(dead_code)]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Take over the throttle window of the navigator that held the focus
    /// before, so a handoff cannot accept two moves inside one window.
    pub fn inherit_throttle(&mut self, from: &FocusNavigator) {
        self.last_accepted = self.last_accepted.max(from.last_accepted);
    }

    /// Force the focus, e.g. after pagination. Clamped; no-op while inactive.
    pub fn set_position(&mut self, index: usize) -> Option<usize> {
        if self.destroyed || self.item_count == 0 {
            return None;
        }
        self.position = clamp(index, self.item_count);
        self.position
    }

    /// Resize the collection, clamping or resetting the focus.
    ///
    /// Dropping to zero deactivates the navigator; growing from zero
    /// reactivates it at the (clamped) initial position.
    pub fn set_item_count(&mut self, item_count: usize) {
        if self.destroyed {
            return;
        }
        self.item_count = item_count;
        self.position = match self.position {
            Some(p) => clamp(p, item_count),
            None => clamp(self.initial_position, item_count),
        };
    }

    /// Start listening on `bus`. Replaces any previous subscription.
    pub fn subscribe(&mut self, bus: &InputBus) {
        if self.destroyed {
            return;
        }
        self.subscription = Some(bus.subscribe());
    }

    /// Stop listening without destroying the focus state.
    pub fn unsubscribe(&mut self) {
        self.subscription = None;
    }

    /// Release the subscription and make every later call a no-op.
    /// Safe to call repeatedly.
    pub fn destroy(&mut self) {
        if !self.destroyed {
            tracing::debug!(topology = ?self.topology, "navigator destroyed");
        }
        self.subscription = None;
        self.destroyed = true;
    }

    /// Drain pending bus events in arrival order.
    pub fn pump(&mut self) -> Vec<NavOutcome> {
        let mut outcomes = Vec::new();
        loop {
            let next = match self.subscription.as_mut() {
                Some(rx) => rx.try_recv(),
                None => break,
            };
            match next {
                Ok(ev) => outcomes.push(self.handle_at(ev.input, ev.at)),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "navigator lagged behind the input bus");
                }
                Err(TryRecvError::Closed) => {
                    self.subscription = None;
                    break;
                }
            }
        }
        outcomes
    }

    /// Apply one input that arrived at `now`.
    pub fn handle_at(&mut self, input: NavInput, now: Instant) -> NavOutcome {
        match input {
            NavInput::Move(direction) => self.handle_directional_at(direction, now),
            NavInput::Select => self.handle_select(),
            NavInput::Back => self.handle_back(),
        }
    }

    /// Directional input stamped with the current instant.
    #[allow(dead_code)]
    pub fn handle_directional(&mut self, direction: Direction) -> NavOutcome {
        self.handle_directional_at(direction, Instant::now())
    }

    /// Directional input that arrived at `now`.
    pub fn handle_directional_at(&mut self, direction: Direction, now: Instant) -> NavOutcome {
        if self.destroyed {
            return NavOutcome::Ignored;
        }
        let Some(from) = self.position else {
            return NavOutcome::Ignored;
        };
        if let Some(last) = self.last_accepted
            && now.saturating_duration_since(last) < self.throttle
        {
            return NavOutcome::Throttled;
        }
        self.last_accepted = Some(now);

        let to = next_position(self.topology, self.wrap, self.item_count, from, direction);
        if to == from {
            NavOutcome::Blocked(direction)
        } else {
            tracing::trace!(from, to, ?direction, "focus moved");
            self.position = Some(to);
            NavOutcome::Moved { from, to }
        }
    }

    /// Select the focused item. Never throttled.
    pub fn handle_select(&mut self) -> NavOutcome {
        match self.position() {
            Some(index) if self.select_bound => NavOutcome::Selected(index),
            _ => NavOutcome::Ignored,
        }
    }

    /// Back, regardless of focus. Never throttled.
    pub fn handle_back(&mut self) -> NavOutcome {
        if self.destroyed || !self.back_bound {
            NavOutcome::Ignored
        } else {
            NavOutcome::Back
        }
    }
}

fn clamp(index: usize, item_count: usize) -> Option<usize> {
    if item_count == 0 {
        None
    } else {
        Some(index.min(item_count - 1))
    }
}

/// Pure transition function. `position` must be below `item_count`.
pub fn next_position(
    topology: Topology,
    wrap: bool,
    item_count: usize,
    position: usize,
    direction: Direction,
) -> usize {
    match topology {
        Topology::Linear => match direction {
            Direction::Up => step_back(wrap, item_count, position),
            Direction::Down => step_forward(wrap, item_count, position),
            Direction::Left | Direction::Right => position,
        },
        Topology::Carousel => match direction {
            Direction::Up | Direction::Left => step_back(wrap, item_count, position),
            Direction::Down | Direction::Right => step_forward(wrap, item_count, position),
        },
        Topology::Grid { columns } => grid_step(columns, wrap, item_count, position, direction),
    }
}

fn step_back(wrap: bool, item_count: usize, position: usize) -> usize {
    if position > 0 {
        position - 1
    } else if wrap {
        item_count - 1
    } else {
        position
    }
}

fn step_forward(wrap: bool, item_count: usize, position: usize) -> usize {
    if position + 1 < item_count {
        position + 1
    } else if wrap {
        0
    } else {
        position
    }
}

fn grid_step(c: usize, wrap: bool, n: usize, p: usize, direction: Direction) -> usize {
    let col = p % c;
    match direction {
        Direction::Up => {
            if p >= c {
                p - c
            } else if wrap {
                bottom_of_column(c, n, col)
            } else {
                p
            }
        }
        Direction::Down => {
            if p + c < n {
                p + c
            } else if wrap {
                col
            } else {
                p
            }
        }
        Direction::Left => {
            if col != 0 {
                p - 1
            } else if wrap {
                // The last row may be short.
                (p + c - 1).min(n - 1)
            } else {
                p
            }
        }
        Direction::Right => {
            let row_end = (p + 1) % c == 0 || p + 1 == n;
            if !row_end {
                p + 1
            } else if wrap {
                p - col
            } else {
                p
            }
        }
    }
}

/// Lowest item in `col`; falls back one row when the last row is too short.
fn bottom_of_column(c: usize, n: usize, col: usize) -> usize {
    let candidate = (n - 1) / c * c + col;
    if candidate < n { candidate } else { candidate - c }
}
