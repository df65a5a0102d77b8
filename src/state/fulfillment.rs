/// Simulated order fulfillment
///
/// Checkout kicks off a fixed, fire-and-forget sequence of phases:
/// Idle → Preparing → Shipping → Delivered → Idle. Each hop is driven by a
/// deferred tick scheduled by the caller; the run's epoch is carried in the
/// tick so a tick left over from a superseded run can be recognized and
/// dropped. Once started a run cannot be cancelled — re-locking the vault
/// mid-delivery does not touch it.

use std::time::Duration;

/// Preparing lasts this long before the order ships
pub const PREPARING_DELAY: Duration = Duration::from_secs(3);
/// Shipping lasts this long before the order arrives
pub const SHIPPING_DELAY: Duration = Duration::from_secs(4);
/// The delivered banner lingers this long before everything resets
pub const DELIVERED_DELAY: Duration = Duration::from_secs(3);

/// Where the simulated order currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FulfillmentPhase {
    Idle,
    Preparing,
    Shipping,
    Delivered,
}

/// Result of feeding a tick to the sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the next phase; schedule another tick after the delay
    Next(Duration),
    /// Sequence finished, phase is back to Idle
    Completed,
    /// Tick belonged to a superseded run; nothing happened
    Stale,
}

/// The phase machine for one session
#[derive(Debug)]
pub struct Fulfillment {
    phase: FulfillmentPhase,
    /// Bumped on every `begin` so old ticks identify themselves
    epoch: u64,
}

impl Fulfillment {
    pub fn new() -> Self {
        Fulfillment {
            phase: FulfillmentPhase::Idle,
            epoch: 0,
        }
    }

    pub fn phase(&self) -> FulfillmentPhase {
        self.phase
    }

    pub fn in_flight(&self) -> bool {
        self.phase != FulfillmentPhase::Idle
    }

    /// Start a run: Idle → Preparing immediately.
    ///
    /// Returns the run's epoch and the delay until its first tick, or
    /// `None` if a run is already in flight.
    pub fn begin(&mut self) -> Option<(u64, Duration)> {
        if self.in_flight() {
            return None;
        }
        self.epoch += 1;
        self.phase = FulfillmentPhase::Preparing;
        Some((self.epoch, PREPARING_DELAY))
    }

    /// Move the run one phase forward. `epoch` must be the stamp handed
    /// out by `begin`; anything else is a stale tick and is ignored.
    pub fn advance(&mut self, epoch: u64) -> Advance {
        if epoch != self.epoch {
            return Advance::Stale;
        }
        match self.phase {
            FulfillmentPhase::Idle => Advance::Stale,
            FulfillmentPhase::Preparing => {
                self.phase = FulfillmentPhase::Shipping;
                Advance::Next(SHIPPING_DELAY)
            }
            FulfillmentPhase::Shipping => {
                self.phase = FulfillmentPhase::Delivered;
                Advance::Next(DELIVERED_DELAY)
            }
            FulfillmentPhase::Delivered => {
                self.phase = FulfillmentPhase::Idle;
                Advance::Completed
            }
        }
    }
}

impl Default for Fulfillment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_walks_every_phase_in_order() {
        let mut f = Fulfillment::new();
        assert_eq!(f.phase(), FulfillmentPhase::Idle);

        let (epoch, delay) = f.begin().unwrap();
        assert_eq!(delay, PREPARING_DELAY);
        assert_eq!(f.phase(), FulfillmentPhase::Preparing);

        assert_eq!(f.advance(epoch), Advance::Next(SHIPPING_DELAY));
        assert_eq!(f.phase(), FulfillmentPhase::Shipping);

        assert_eq!(f.advance(epoch), Advance::Next(DELIVERED_DELAY));
        assert_eq!(f.phase(), FulfillmentPhase::Delivered);

        assert_eq!(f.advance(epoch), Advance::Completed);
        assert_eq!(f.phase(), FulfillmentPhase::Idle);
    }

    #[test]
    fn test_begin_while_in_flight_is_rejected() {
        let mut f = Fulfillment::new();
        let (epoch, _) = f.begin().unwrap();

        assert!(f.begin().is_none());
        assert_eq!(f.phase(), FulfillmentPhase::Preparing);

        // The first run keeps going
        assert_eq!(f.advance(epoch), Advance::Next(SHIPPING_DELAY));
    }

    #[test]
    fn test_stale_tick_is_ignored() {
        let mut f = Fulfillment::new();
        let (first, _) = f.begin().unwrap();
        f.advance(first);
        f.advance(first);
        f.advance(first); // run complete

        let (second, _) = f.begin().unwrap();
        assert_ne!(first, second);

        assert_eq!(f.advance(first), Advance::Stale);
        assert_eq!(f.phase(), FulfillmentPhase::Preparing);
    }

    #[test]
    fn test_tick_while_idle_is_ignored() {
        let mut f = Fulfillment::new();
        assert_eq!(f.advance(0), Advance::Stale);
        assert_eq!(f.advance(1), Advance::Stale);
        assert_eq!(f.phase(), FulfillmentPhase::Idle);
    }
}
