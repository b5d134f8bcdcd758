use crate::message::Message;
use crate::model::{Notice, NoticeKind};
use iced::border::{Border, Radius};
use iced::widget::text::Wrapping;
use iced::widget::{button, column, container, row, text, Container, Space};
use iced::{Alignment, Background, Color, Element, Length, Shadow, Theme, Vector};

pub fn card<'a>(content: impl Into<Element<'a, Message>>) -> Container<'a, Message> {
    container(content)
        .padding(24)
        .width(Length::Fill)
        .style(card_style)
}

pub fn card_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(Background::Color(palette.background.weak.color)),
        border: Border {
            color: palette.background.strong.color,
            width: 2.0,
            radius: Radius::new(24.0),
        },
        shadow: Shadow {
            color: Color::BLACK.scale_alpha(0.15),
            offset: Vector::new(0.0, 4.0),
            blur_radius: 12.0,
        },
        ..Default::default()
    }
}

/// Style of the clickable drop zone. `drag_over` highlights it while files
/// hover above the window.
pub fn drop_zone_style(
    theme: &Theme,
    status: button::Status,
    drag_over: bool,
) -> button::Style {
    let palette = theme.extended_palette();

    let mut background_color = if drag_over {
        palette.primary.weak.color.scale_alpha(0.35)
    } else {
        palette.background.base.color
    };
    let border_color = if drag_over {
        palette.primary.strong.color
    } else {
        palette.background.strong.color
    };

    match status {
        button::Status::Hovered => {
            background_color = palette.background.weak.color;
        }
        button::Status::Pressed => {
            background_color = palette.background.strong.color.scale_alpha(0.6);
        }
        button::Status::Disabled => {
            background_color = background_color.scale_alpha(0.5);
        }
        button::Status::Active => {}
    }

    button::Style {
        background: Some(Background::Color(background_color)),
        text_color: palette.background.base.text,
        border: Border {
            color: border_color,
            width: 2.0,
            radius: Radius::new(16.0),
        },
        shadow: Shadow::default(),
    }
}

pub fn notice_banner(notice: &Notice) -> Element<'_, Message> {
    let kind = notice.kind;
    let content = row![
        column![
            text(&notice.title).size(16),
            text(&notice.description)
                .size(14)
                .wrapping(Wrapping::Word),
        ]
        .spacing(4)
        .width(Length::Fill),
        Space::with_width(Length::Fixed(12.0)),
        button(text("✕").size(14))
            .padding([4, 8])
            .style(button::text)
            .on_press(Message::DismissNotice),
    ]
    .align_y(Alignment::Center);

    container(content)
        .padding([12, 16])
        .width(Length::Fill)
        .style(move |theme: &Theme| {
            let palette = theme.extended_palette();
            let accent = match kind {
                NoticeKind::Info => palette.primary.base.color,
                NoticeKind::Warning => palette.danger.base.color,
            };

            container::Style {
                background: Some(Background::Color(accent.scale_alpha(0.15))),
                text_color: Some(palette.background.base.text),
                border: Border {
                    color: accent,
                    width: 1.0,
                    radius: Radius::new(12.0),
                },
                ..Default::default()
            }
        })
        .into()
}
