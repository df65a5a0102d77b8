use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Color, Element, Length};

use crate::state::gate::{AccessGate, GateMode, PIN_LEN};
use crate::Message;

const ORANGE: Color = Color::from_rgb(0.92, 0.45, 0.05);
const CYAN: Color = Color::from_rgb(0.0, 0.75, 0.85);
const RED: Color = Color::from_rgb(0.86, 0.21, 0.18);
const DIM: Color = Color::from_rgb(0.45, 0.45, 0.45);

/// The full-screen vault door shown whenever the gate is not unlocked.
/// Covers both registration (first run) and the regular locked state.
pub fn vault_door(gate: &AccessGate) -> Element<'static, Message> {
    let registering = gate.mode() == GateMode::Registration;

    let title = if registering {
        "Secure Your Account"
    } else {
        "Vault Access Control"
    };

    // Entered digits padded with • up to the 4 slots, spaced out
    let mut slots = String::new();
    for i in 0..PIN_LEN {
        slots.push(gate.buffer().chars().nth(i).unwrap_or('•'));
        slots.push(' ');
    }

    let code_color = if gate.has_error() {
        RED
    } else if registering {
        CYAN
    } else {
        ORANGE
    };

    let status = if gate.has_error() { "ACCESS DENIED" } else { "" };

    let content = column![
        text(title).size(28),
        text("BIOMETRIC VERIFICATION LEVEL 4").size(11).color(DIM),
        container(text(slots).size(40).color(code_color)).padding(16),
        text(status).size(14).color(RED),
        keypad(),
    ]
    .spacing(16)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

/// The 3-column keypad: digits, a clear key, and an inert OK key
fn keypad() -> Element<'static, Message> {
    column![
        row![digit(1), digit(2), digit(3)].spacing(12),
        row![digit(4), digit(5), digit(6)].spacing(12),
        row![digit(7), digit(8), digit(9)].spacing(12),
        row![
            key("C".to_string(), Some(Message::KeypadClear)),
            digit(0),
            key("OK".to_string(), None),
        ]
        .spacing(12),
    ]
    .spacing(12)
    .into()
}

fn digit(d: u8) -> Element<'static, Message> {
    key(d.to_string(), Some(Message::KeypadDigit(d)))
}

fn key(label: String, press: Option<Message>) -> Element<'static, Message> {
    let key = button(text(label).size(18).center())
        .width(Length::Fixed(64.0))
        .padding(14);

    match press {
        Some(message) => key.on_press(message).into(),
        // No handler = disabled; the OK key is decorative
        None => key.into(),
    }
}
