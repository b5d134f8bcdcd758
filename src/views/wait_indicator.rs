use crate::message::Message;
use iced::widget::{column, row, text};
use iced::{Alignment, Element, Length};

pub const DEFAULT_WAIT_MESSAGE: &str = "Analyzing retinal image...";

const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];
const DOT_COUNT: usize = 3;

pub fn wait_indicator(message: Option<&str>, frame: usize) -> Element<'_, Message> {
    let dots = (0..DOT_COUNT).fold(row![].spacing(4), |dots, index| {
        let glyph = if frame % DOT_COUNT == index { "●" } else { "•" };
        dots.push(text(glyph).size(16))
    });

    column![
        text(SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]).size(48),
        text(message.unwrap_or(DEFAULT_WAIT_MESSAGE)).size(18),
        text("This may take a few seconds...").size(14),
        dots,
    ]
    .spacing(12)
    .padding([48, 0])
    .width(Length::Fill)
    .align_x(Alignment::Center)
    .into()
}
