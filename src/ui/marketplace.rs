use iced::widget::{button, column, container, horizontal_space, row, scrollable, text};
use iced::{Alignment, Color, Element, Length};
use iced_aw::Wrap;

use crate::catalog::{CatalogItem, CATALOG};
use crate::state::session::Session;
use crate::Message;

const ORANGE: Color = Color::from_rgb(0.92, 0.45, 0.05);
const DIM: Color = Color::from_rgb(0.45, 0.45, 0.45);

/// The unlocked marketplace: brand header, cart/lock controls and the
/// catalog grid. Only reachable once the gate is unlocked, which is what
/// keeps the add-to-cart surface behind the PIN.
pub fn marketplace(session: &Session) -> Element<'static, Message> {
    let header = row![
        text("CHOWHUB").size(36),
        horizontal_space(),
        button(text(format!("Vault ({})", session.cart_len())).size(16))
            .on_press(Message::OpenCart)
            .padding(12),
        button(text("Lock").size(16))
            .on_press(Message::Lock)
            .padding(12),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let cards: Vec<Element<'static, Message>> = CATALOG.iter().map(card).collect();
    let grid = Wrap::with_elements(cards).spacing(16.0).line_spacing(16.0);

    let content = column![
        header,
        text("Unlocked Cravings").size(28),
        scrollable(grid).height(Length::Fill),
    ]
    .spacing(24)
    .padding(32);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// One restaurant card
fn card(item: &'static CatalogItem) -> Element<'static, Message> {
    container(
        column![
            text(item.name).size(20),
            text(format!("⭐ {:.1} • {} min", item.rating, item.time))
                .size(13)
                .color(DIM),
            text(format!("R{}", item.price)).size(24).color(ORANGE),
            button(text("Add to Vault").size(14))
                .on_press(Message::AddToCart(item.id))
                .padding(10),
        ]
        .spacing(8),
    )
    .width(Length::Fixed(220.0))
    .padding(16)
    .into()
}
