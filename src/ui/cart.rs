use chrono::{DateTime, Local};
use iced::widget::{button, column, container, horizontal_space, row, scrollable, text, Column};
use iced::{Alignment, Color, Element, Length};

use crate::state::fulfillment::FulfillmentPhase;
use crate::state::session::Session;
use crate::Message;

const ORANGE: Color = Color::from_rgb(0.92, 0.45, 0.05);
const DIM: Color = Color::from_rgb(0.45, 0.45, 0.45);

/// The vault summary: everything ordered so far, the running total, the
/// checkout button and — once checkout fires — the delivery status strip.
pub fn cart_panel(session: &Session, placed_at: Option<DateTime<Local>>) -> Element<'static, Message> {
    let header = row![
        text("VAULT SUMMARY").size(28),
        horizontal_space(),
        button(text("Close").size(16))
            .on_press(Message::CloseCart)
            .padding(10),
    ]
    .align_y(Alignment::Center);

    let body: Element<'static, Message> = if session.cart_is_empty() {
        container(text("Your vault is empty.").size(18).color(DIM))
            .padding(40)
            .center_x(Length::Fill)
            .into()
    } else {
        let mut list = Column::new().spacing(12);
        for entry in session.cart_entries() {
            list = list.push(
                row![
                    column![
                        text(entry.item.name).size(16),
                        text(format!("R{}", entry.item.price)).size(14).color(ORANGE),
                    ]
                    .spacing(4),
                    horizontal_space(),
                    button(text("Remove").size(14))
                        .on_press(Message::RemoveFromCart(entry.entry_id))
                        .padding(8),
                ]
                .align_y(Alignment::Center),
            );
        }
        scrollable(list).height(Length::Fill).into()
    };

    let footer = footer(session, placed_at);

    let content = column![header, body, footer].spacing(20).padding(32);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Total + checkout while idle, the delivery status strip while an order
/// is in flight, nothing for an empty idle cart.
fn footer(session: &Session, placed_at: Option<DateTime<Local>>) -> Element<'static, Message> {
    if session.phase() != FulfillmentPhase::Idle {
        let placed = placed_at
            .map(|t| format!("Order authorized at {}", t.format("%H:%M")))
            .unwrap_or_default();

        return column![
            text(status_line(session.phase())).size(20).color(ORANGE),
            text(placed).size(13).color(DIM),
        ]
        .spacing(6)
        .into();
    }

    if session.cart_is_empty() {
        return column![].into();
    }

    column![
        row![
            text("TOTAL VALUE").size(13).color(DIM),
            horizontal_space(),
            text(format!("R{}", session.total())).size(30).color(ORANGE),
        ]
        .align_y(Alignment::Center),
        button(text("Authorize Checkout").size(16))
            .on_press(Message::Checkout)
            .padding(14)
            .width(Length::Fill),
    ]
    .spacing(16)
    .into()
}

fn status_line(phase: FulfillmentPhase) -> &'static str {
    match phase {
        FulfillmentPhase::Idle => "",
        FulfillmentPhase::Preparing => "👨\u{200d}🍳 Preparing your order...",
        FulfillmentPhase::Shipping => "🚁 Drone en route to you...",
        FulfillmentPhase::Delivered => "✅ Delivered! Enjoy.",
    }
}
