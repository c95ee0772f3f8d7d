//! Input stream shared between the key router and the mounted navigators.

use std::time::Instant;
use tokio::sync::broadcast;

use crate::focus::NavInput;

/// Default queue depth per subscriber.
pub const DEFAULT_CAPACITY: usize = 64;

/// One symbolic input together with the instant it arrived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputEvent {
    /// Directional, select or back input.
    pub input: NavInput,
    /// Arrival time used for throttling.
    pub at: Instant,
}

/// Broadcast bus carrying symbolic inputs.
///
/// Every navigator holds its own receiver; dropping the receiver ends the
/// subscription, so nothing outlives the navigator that registered it.
#[derive(Debug)]
pub struct InputBus {
    tx: broadcast::Sender<InputEvent>,
}

impl InputBus {
    /// Create a bus whose subscribers can buffer `capacity` events.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish an input stamped with the current instant.
    pub fn publish(&self, input: NavInput) -> usize {
        self.publish_at(input, Instant::now())
    }

    /// Publish an input with an explicit arrival instant.
    ///
    /// Returns how many subscribers received it. Zero subscribers is fine:
    /// screens without a listening navigator simply drop the input.
    pub fn publish_at(&self, input: NavInput, at: Instant) -> usize {
        match self.tx.send(InputEvent { input, at }) {
            Ok(n) => n,
            Err(_) => {
                tracing::debug!(?input, "input dropped: no subscribers");
                0
            }
        }
    }

    /// Register a new listener. Only events published afterwards are seen.
    pub fn subscribe(&self) -> broadcast::Receiver<InputEvent> {
        self.tx.subscribe()
    }

    /// Number of live listeners.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for InputBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::Direction;

    #[test]
    fn test_publish_without_subscribers_is_not_an_error() {
        let bus = InputBus::default();
        assert_eq!(bus.publish(NavInput::Select), 0);
    }

    #[test]
    fn test_subscriber_count_follows_receiver_lifetime() {
        let bus = InputBus::default();
        let a = bus.subscribe();
        let b = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);
        drop(a);
        assert_eq!(bus.subscriber_count(), 1);
        drop(b);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_events_arrive_in_order_with_timestamps() {
        let bus = InputBus::default();
        let mut rx = bus.subscribe();
        let t0 = Instant::now();
        bus.publish_at(NavInput::Move(Direction::Down), t0);
        bus.publish_at(NavInput::Back, t0);

        let first = rx.try_recv().unwrap();
        assert_eq!(first.input, NavInput::Move(Direction::Down));
        assert_eq!(first.at, t0);
        assert_eq!(rx.try_recv().unwrap().input, NavInput::Back);
        assert!(rx.try_recv().is_err());
    }
}
