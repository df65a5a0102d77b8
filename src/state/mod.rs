/// State management module
///
/// This module handles all application state, including:
/// - PIN persistence and the storage boundary (store.rs)
/// - The vault access gate state machine (gate.rs)
/// - The shopping cart (cart.rs)
/// - The simulated delivery sequence (fulfillment.rs)
/// - The per-run session tying it all together (session.rs)

pub mod cart;
pub mod fulfillment;
pub mod gate;
pub mod session;
pub mod store;
