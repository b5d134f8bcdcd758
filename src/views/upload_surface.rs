use crate::components::drop_zone_style;
use crate::message::Message;
use crate::model::SelectedImage;
use crate::utils::human_size;
use iced::widget::{button, column, container, row, stack, text, Image};
use iced::{Alignment, ContentFit, Element, Length};

const PREVIEW_HEIGHT: f32 = 256.0;

/// Drop zone while nothing is selected, preview of the selection otherwise.
/// `busy` disables picking and removal.
pub fn upload_surface(
    selection: Option<&SelectedImage>,
    drag_over: bool,
    busy: bool,
) -> Element<'_, Message> {
    match selection {
        Some(selected) => preview(selected, busy),
        None => drop_zone(drag_over, busy),
    }
}

fn preview(selected: &SelectedImage, busy: bool) -> Element<'_, Message> {
    let image = Image::new(selected.display_url.handle().clone())
        .width(Length::Fill)
        .height(Length::Fixed(PREVIEW_HEIGHT))
        .content_fit(ContentFit::Cover);

    let remove = button(text("✕").size(14))
        .padding([4, 9])
        .style(button::danger)
        .on_press_maybe((!busy).then_some(Message::RemoveImage));

    let framed = stack![
        image,
        container(remove)
            .padding(8)
            .width(Length::Fill)
            .align_x(Alignment::End),
    ];

    column![
        container(framed).max_width(448.0),
        text("Retinal image ready for analysis").size(14),
        text(format!(
            "{} · {}",
            selected.file.file_name,
            human_size(selected.file.size())
        ))
        .size(12),
    ]
    .spacing(8)
    .align_x(Alignment::Center)
    .width(Length::Fill)
    .into()
}

fn drop_zone(drag_over: bool, busy: bool) -> Element<'static, Message> {
    let content = column![
        text("⇪").size(40),
        text("Drop your retinal image here").size(18),
        text("or browse files").size(14),
        text("Supports JPEG, JPG, PNG formats").size(12),
        row![text("▣").size(12), text("Max file size: 10MB").size(12)].spacing(6),
    ]
    .spacing(10)
    .align_x(Alignment::Center);

    let zone = button(
        container(content)
            .padding(32)
            .width(Length::Fill)
            .align_x(Alignment::Center),
    )
    .width(Length::Fill)
    .padding(0)
    .on_press_maybe((!busy).then_some(Message::PickImage))
    .style(move |theme, status| drop_zone_style(theme, status, drag_over));

    container(zone).max_width(448.0).into()
}
