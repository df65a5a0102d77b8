/// Per-run session state
///
/// Owns everything the UI reads: the access gate, the cart, the fulfillment
/// phase and the transient add-to-cart notice. Nothing here survives a
/// restart except the PIN, which lives in the credential store.

use std::time::Duration;

use crate::catalog::CatalogItem;

use super::cart::{Cart, CartEntry};
use super::fulfillment::{Advance, Fulfillment, FulfillmentPhase};
use super::gate::AccessGate;

/// How long the "Added ... to vault!" banner stays up
pub const NOTICE_DURATION: Duration = Duration::from_secs(2);

/// All mutable state for one run of the application
#[derive(Debug)]
pub struct Session {
    pub gate: AccessGate,
    cart: Cart,
    fulfillment: Fulfillment,
    /// Transient confirmation banner, if one is showing
    notice: Option<String>,
    /// Stamp for the banner so a stale expiry tick is a no-op
    notice_epoch: u64,
}

impl Session {
    pub fn new(gate: AccessGate) -> Self {
        Session {
            gate,
            cart: Cart::new(),
            fulfillment: Fulfillment::new(),
            notice: None,
            notice_epoch: 0,
        }
    }

    pub fn cart_entries(&self) -> &[CartEntry] {
        self.cart.entries()
    }

    pub fn cart_len(&self) -> usize {
        self.cart.len()
    }

    pub fn cart_is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Current order total, recomputed from the cart every time
    pub fn total(&self) -> u32 {
        self.cart.total()
    }

    pub fn phase(&self) -> FulfillmentPhase {
        self.fulfillment.phase()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Put `item` in the cart and raise the confirmation banner.
    ///
    /// Returns the banner's epoch; the caller schedules `expire_notice`
    /// with it after `NOTICE_DURATION`. The unlocked-gate precondition is
    /// the view's contract — the add surface is only rendered once the
    /// gate is open.
    pub fn add_item(&mut self, item: CatalogItem) -> u64 {
        self.cart.add(item);
        self.notice = Some(format!("Added {} to vault!", item.name));
        self.notice_epoch += 1;
        self.notice_epoch
    }

    /// Remove one cart entry; silently ignores an unknown id
    pub fn remove_item(&mut self, entry_id: u64) {
        self.cart.remove(entry_id);
    }

    /// Take the banner down, unless a newer one has replaced it
    pub fn expire_notice(&mut self, epoch: u64) {
        if epoch == self.notice_epoch {
            self.notice = None;
        }
    }

    /// Kick off the delivery sequence.
    ///
    /// A no-op on an empty cart and while a run is already in flight.
    /// Returns the run's epoch and the delay until its first tick.
    pub fn begin_fulfillment(&mut self) -> Option<(u64, Duration)> {
        if self.cart.is_empty() {
            return None;
        }
        self.fulfillment.begin()
    }

    /// Feed one deferred tick to the delivery sequence. On completion the
    /// cart is cleared in the same step.
    pub fn advance_fulfillment(&mut self, epoch: u64) -> Advance {
        let advance = self.fulfillment.advance(epoch);
        if advance == Advance::Completed {
            self.cart.clear();
        }
        advance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CATALOG;
    use crate::state::fulfillment::FulfillmentPhase;
    use crate::state::gate::GateMode;
    use crate::state::store::MemoryStore;

    fn unlocked_session() -> Session {
        let mut gate = AccessGate::new(Some("1234".to_string()));
        let mut store = MemoryStore::default();
        for d in [1, 2, 3, 4] {
            gate.submit_digit(d, &mut store).unwrap();
        }
        assert!(gate.is_unlocked());
        Session::new(gate)
    }

    #[test]
    fn test_add_raises_notice_and_expiry_lowers_it() {
        let mut session = unlocked_session();

        let epoch = session.add_item(CATALOG[0]);
        assert_eq!(session.notice(), Some("Added The Burger Vault to vault!"));

        session.expire_notice(epoch);
        assert_eq!(session.notice(), None);
    }

    #[test]
    fn test_stale_notice_expiry_keeps_newer_banner() {
        let mut session = unlocked_session();

        let first = session.add_item(CATALOG[0]);
        let _second = session.add_item(CATALOG[1]);

        session.expire_notice(first);
        assert_eq!(session.notice(), Some("Added Neon Sushi Bar to vault!"));
    }

    #[test]
    fn test_checkout_on_empty_cart_is_a_noop() {
        let mut session = unlocked_session();
        assert!(session.begin_fulfillment().is_none());
        assert_eq!(session.phase(), FulfillmentPhase::Idle);
    }

    #[test]
    fn test_full_delivery_clears_the_cart() {
        let mut session = unlocked_session();
        session.add_item(CATALOG[0]);
        session.add_item(CATALOG[1]);

        let (epoch, _) = session.begin_fulfillment().unwrap();
        assert_eq!(session.phase(), FulfillmentPhase::Preparing);

        assert_eq!(
            session.advance_fulfillment(epoch),
            Advance::Next(crate::state::fulfillment::SHIPPING_DELAY)
        );
        assert_eq!(session.phase(), FulfillmentPhase::Shipping);
        // Cart untouched mid-flight
        assert_eq!(session.total(), 205);

        assert_eq!(
            session.advance_fulfillment(epoch),
            Advance::Next(crate::state::fulfillment::DELIVERED_DELAY)
        );
        assert_eq!(session.phase(), FulfillmentPhase::Delivered);

        assert_eq!(session.advance_fulfillment(epoch), Advance::Completed);
        assert_eq!(session.phase(), FulfillmentPhase::Idle);
        assert!(session.cart_is_empty());
        assert_eq!(session.total(), 0);
    }

    #[test]
    fn test_relock_does_not_interrupt_delivery() {
        let mut session = unlocked_session();
        session.add_item(CATALOG[2]);

        let (epoch, _) = session.begin_fulfillment().unwrap();
        session.advance_fulfillment(epoch);
        assert_eq!(session.phase(), FulfillmentPhase::Shipping);

        // Re-lock mid-flight
        session.gate.lock();
        assert_eq!(session.gate.mode(), GateMode::Locked);

        // The run carries on and still clears the cart
        session.advance_fulfillment(epoch);
        assert_eq!(session.advance_fulfillment(epoch), Advance::Completed);
        assert!(session.cart_is_empty());
    }
}
