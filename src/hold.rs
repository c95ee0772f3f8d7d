//! Timed key-hold gesture used to unlock hidden screens.
//!
//! Terminals rarely report key releases, so a hold is recognised from the
//! auto-repeat stream: presses arriving closer together than `repeat_gap`
//! count as one continuous hold. A release event, when the terminal does
//! report one, ends the hold immediately.

use std::time::{Duration, Instant};

/// Default time the key must be held.
pub const DEFAULT_HOLD: Duration = Duration::from_secs(5);
/// Default maximum spacing between auto-repeat events.
pub const DEFAULT_REPEAT_GAP: Duration = Duration::from_millis(600);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoldState {
    Idle,
    Holding { since: Instant, last_seen: Instant },
    /// Fired; stays here until released or reset.
    Triggered,
}

#[derive(Clone, Debug)]
pub struct HoldDetector {
    state: HoldState,
    threshold: Duration,
    repeat_gap: Duration,
}

impl HoldDetector {
    pub fn new(threshold: Duration, repeat_gap: Duration) -> Self {
        Self {
            state: HoldState::Idle,
            threshold,
            repeat_gap,
        }
    }

    pub fn state(&self) -> HoldState {
        self.state
    }

    /// Register a press or repeat. Returns `true` exactly once per hold.
    pub fn press(&mut self, now: Instant) -> bool {
        match self.state {
            HoldState::Idle => {
                self.state = HoldState::Holding {
                    since: now,
                    last_seen: now,
                };
                false
            }
            HoldState::Holding { since, last_seen } => {
                if now.saturating_duration_since(last_seen) > self.repeat_gap {
                    // Repeats stopped in between: this is a new hold.
                    self.state = HoldState::Holding {
                        since: now,
                        last_seen: now,
                    };
                    false
                } else if now.saturating_duration_since(since) >= self.threshold {
                    self.state = HoldState::Triggered;
                    true
                } else {
                    self.state = HoldState::Holding {
                        since,
                        last_seen: now,
                    };
                    false
                }
            }
            HoldState::Triggered => false,
        }
    }

    /// Register a release. A hold that lasted long enough fires here.
    pub fn release(&mut self, now: Instant) -> bool {
        let fired = matches!(
            self.state,
            HoldState::Holding { since, .. } if now.saturating_duration_since(since) >= self.threshold
        );
        self.state = HoldState::Idle;
        fired
    }

    /// Drop a hold whose repeats have stopped arriving.
    pub fn poll(&mut self, now: Instant) {
        if let HoldState::Holding { last_seen, .. } = self.state
            && now.saturating_duration_since(last_seen) > self.repeat_gap
        {
            self.state = HoldState::Idle;
        }
    }

    pub fn reset(&mut self) {
        self.state = HoldState::Idle;
    }
}

impl Default for HoldDetector {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD, DEFAULT_REPEAT_GAP)
    }
}
