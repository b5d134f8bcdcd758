use crate::message::Message;
use crate::model::{Severity, SeverityTone};
use iced::border::{Border, Radius};
use iced::widget::text::Wrapping;
use iced::widget::{container, row, text, Container};
use iced::{Alignment, Background, Color, Theme};

const AMBER: Color = Color {
    r: 0.79,
    g: 0.54,
    b: 0.02,
    a: 1.0,
};

pub fn severity_badge<'a>(severity: &Severity) -> Container<'a, Message> {
    let tone = severity.tone();
    let icon = match tone {
        SeverityTone::Affirmative => "✔",
        SeverityTone::Warning => "⚠",
        SeverityTone::Neutral => "◉",
    };

    let content = row![text(icon).size(14), text(severity.label()).size(14)]
        .spacing(6)
        .align_y(Alignment::Center);

    container(content)
        .padding([4, 12])
        .style(move |theme| pill_style(theme, tone_color(theme, tone)))
}

pub fn area_tag(label: &str) -> Container<'_, Message> {
    container(text(label).size(13).wrapping(Wrapping::None))
        .padding([4, 10])
        .style(|theme: &Theme| {
            let palette = theme.extended_palette();
            pill_style(theme, palette.background.strong.color)
        })
}

fn tone_color(theme: &Theme, tone: SeverityTone) -> Color {
    let palette = theme.extended_palette();
    match tone {
        SeverityTone::Affirmative => palette.success.base.color,
        SeverityTone::Warning => AMBER,
        SeverityTone::Neutral => palette.primary.base.color,
    }
}

fn pill_style(theme: &Theme, accent: Color) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(Background::Color(accent.scale_alpha(0.2))),
        text_color: Some(palette.background.base.text),
        border: Border {
            color: accent.scale_alpha(0.7),
            width: 1.0,
            radius: Radius::new(999.0),
        },
        ..Default::default()
    }
}
