use iced::widget::column;
use iced::{Element, Task, Theme};
use std::time::Duration;

mod catalog;
mod state;
mod ui;

use state::fulfillment::Advance;
use state::gate::{AccessGate, SubmitOutcome, ERROR_FLASH};
use state::session::{Session, NOTICE_DURATION};
use state::store::{CredentialStore, PinStore, PIN_KEY};

/// Main application state
pub struct ChowHub {
    /// The stateful core: gate, cart, fulfillment, notice
    session: Session,
    /// Persistent storage for the vault PIN
    store: PinStore,
    /// Whether the cart summary is showing instead of the marketplace
    show_cart: bool,
    /// When the in-flight order was authorized, for the status strip
    placed_at: Option<chrono::DateTime<chrono::Local>>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// A keypad digit was pressed
    KeypadDigit(u8),
    /// The keypad clear key was pressed
    KeypadClear,
    /// The wrong-code flash for the stamped attempt timed out
    GateErrorExpired(u64),
    /// The lock button was pressed
    Lock,
    /// An "Add to Vault" button was pressed, by catalog id
    AddToCart(u32),
    /// The stamped confirmation banner timed out
    NoticeExpired(u64),
    /// A cart entry's remove button was pressed, by entry id
    RemoveFromCart(u64),
    OpenCart,
    CloseCart,
    /// The checkout button was pressed
    Checkout,
    /// A deferred delivery tick for the stamped run fired
    FulfillmentTick(u64),
}

impl ChowHub {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        // Initialize the settings database
        // If this fails, we panic because the app cannot function without it
        let store = PinStore::new()
            .expect("Failed to initialize settings database. Check permissions and disk space.");

        let stored_pin = store
            .get(PIN_KEY)
            .expect("Failed to read the stored PIN from the settings database.");

        let status = if stored_pin.is_some() {
            "vault PIN on file"
        } else {
            "first run, registration required"
        };
        println!("🍔 ChowHub initialized ({status})");

        let session = Session::new(AccessGate::new(stored_pin));

        (
            ChowHub {
                session,
                store,
                show_cart: false,
                placed_at: None,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::KeypadDigit(digit) => {
                match self.session.gate.submit_digit(digit, &mut self.store) {
                    Ok(SubmitOutcome::Mismatch) => {
                        // Flash the wrong-code state, then reset the buffer
                        let epoch = self.session.gate.error_epoch();
                        after(ERROR_FLASH, Message::GateErrorExpired(epoch))
                    }
                    Ok(_) => Task::none(),
                    Err(e) => {
                        // Registration write failed; drop the entry so the
                        // user can try again
                        eprintln!("⚠️  Could not store the vault PIN: {e}");
                        self.session.gate.clear_buffer();
                        Task::none()
                    }
                }
            }
            Message::KeypadClear => {
                self.session.gate.clear_buffer();
                Task::none()
            }
            Message::GateErrorExpired(epoch) => {
                self.session.gate.expire_error(epoch);
                Task::none()
            }
            Message::Lock => {
                // An in-flight delivery is deliberately left running; it
                // will still clear the cart when it completes.
                self.session.gate.lock();
                self.show_cart = false;
                Task::none()
            }
            Message::AddToCart(catalog_id) => match catalog::find(catalog_id) {
                Some(item) => {
                    let epoch = self.session.add_item(*item);
                    after(NOTICE_DURATION, Message::NoticeExpired(epoch))
                }
                None => Task::none(),
            },
            Message::NoticeExpired(epoch) => {
                self.session.expire_notice(epoch);
                Task::none()
            }
            Message::RemoveFromCart(entry_id) => {
                self.session.remove_item(entry_id);
                Task::none()
            }
            Message::OpenCart => {
                self.show_cart = true;
                Task::none()
            }
            Message::CloseCart => {
                self.show_cart = false;
                Task::none()
            }
            Message::Checkout => match self.session.begin_fulfillment() {
                Some((epoch, delay)) => {
                    self.placed_at = Some(chrono::Local::now());
                    println!(
                        "🚀 Order authorized: {} items, R{} total",
                        self.session.cart_len(),
                        self.session.total()
                    );
                    after(delay, Message::FulfillmentTick(epoch))
                }
                // Empty cart (or a run already in flight): nothing to do
                None => Task::none(),
            },
            Message::FulfillmentTick(epoch) => match self.session.advance_fulfillment(epoch) {
                Advance::Next(delay) => after(delay, Message::FulfillmentTick(epoch)),
                Advance::Completed => {
                    self.placed_at = None;
                    self.show_cart = false;
                    println!("📦 Order delivered, vault cleared");
                    Task::none()
                }
                Advance::Stale => Task::none(),
            },
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let screen: Element<Message> = if !self.session.gate.is_unlocked() {
            ui::keypad::vault_door(&self.session.gate)
        } else if self.show_cart {
            ui::cart::cart_panel(&self.session, self.placed_at)
        } else {
            ui::marketplace::marketplace(&self.session)
        };

        match self.session.notice() {
            Some(notice) => column![ui::notice_banner(notice), screen].into(),
            None => screen,
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application("ChowHub", ChowHub::update, ChowHub::view)
        .theme(ChowHub::theme)
        .centered()
        .run_with(ChowHub::new)
}

/// Schedule `message` to be delivered after `delay`
fn after(delay: Duration, message: Message) -> Task<Message> {
    Task::perform(tokio::time::sleep(delay), move |()| message.clone())
}
