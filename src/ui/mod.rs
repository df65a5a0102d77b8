/// View construction
///
/// One file per screen: the vault door (keypad.rs), the marketplace grid
/// (marketplace.rs) and the cart summary (cart.rs). All timing and
/// choreography lives in the update loop; these functions only render.

use iced::widget::{container, text};
use iced::{Element, Length};

use crate::Message;

pub mod cart;
pub mod keypad;
pub mod marketplace;

/// The transient add-to-cart confirmation shown above the active screen
pub fn notice_banner(notice: &str) -> Element<'static, Message> {
    container(text(format!("🛡 {notice}")).size(16))
        .padding(12)
        .center_x(Length::Fill)
        .into()
}
