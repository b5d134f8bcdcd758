use crate::components::{area_tag, card, severity_badge};
use crate::message::Message;
use crate::model::{AnalysisResult, ResultSummary};
use iced::widget::text::Wrapping;
use iced::widget::{column, container, progress_bar, row, text, Column, Image};
use iced::{Alignment, ContentFit, Element, Length};

const PANE_HEIGHT: f32 = 256.0;

/// Renders a result next to the image it was computed from. `overlay` is the
/// resolved segmentation image, if the server supplied one.
pub fn results_panel<'a>(
    result: &'a AnalysisResult,
    original: &'a iced::widget::image::Handle,
    overlay: Option<&'a iced::widget::image::Handle>,
) -> Element<'a, Message> {
    let summary = ResultSummary::from_result(result);

    column![findings_card(&summary), comparison_card(original, overlay)]
        .spacing(24)
        .width(Length::Fill)
        .into()
}

fn findings_card<'a>(summary: &ResultSummary<'a>) -> Element<'a, Message> {
    let mut condition = row![text(summary.condition).size(24)]
        .spacing(12)
        .align_y(Alignment::Center);
    if let Some(severity) = &summary.severity {
        condition = condition.push(severity_badge(severity));
    }

    let scores = column![
        text("Detected Condition").size(18),
        condition,
        score_row(
            "Detection Probability",
            summary.probability_label(),
            summary.probability_percent,
        ),
        score_row(
            "Model Confidence",
            summary.confidence_label(),
            summary.confidence_percent,
        ),
    ]
    .spacing(16)
    .width(Length::FillPortion(1));

    let mut details = column![].spacing(16).width(Length::FillPortion(1));

    if let Some(areas) = summary.affected_areas {
        let tags = areas
            .iter()
            .fold(row![].spacing(8), |tags, area| tags.push(area_tag(area)))
            .wrap();
        details = details.push(column![text("Affected Areas").size(14), tags].spacing(8));
    }

    if let Some(recommendations) = summary.recommendations {
        let list = recommendations
            .iter()
            .fold(Column::new().spacing(6), |list, recommendation| {
                list.push(
                    row![
                        text("•").size(14),
                        text(recommendation.as_str())
                            .size(14)
                            .wrapping(Wrapping::Word),
                    ]
                    .spacing(8),
                )
            });
        details = details.push(column![text("Recommendations").size(14), list].spacing(8));
    }

    card(
        column![
            text("Analysis Results").size(20),
            row![scores, details].spacing(24),
        ]
        .spacing(16),
    )
    .into()
}

fn score_row<'a>(label: &'a str, value_label: String, percent: u8) -> Column<'a, Message> {
    column![
        row![
            text(label).size(14).width(Length::Fill),
            text(value_label).size(14),
        ],
        progress_bar(0.0..=100.0, f32::from(percent)).height(Length::Fixed(12.0)),
    ]
    .spacing(6)
}

fn comparison_card<'a>(
    original: &'a iced::widget::image::Handle,
    overlay: Option<&'a iced::widget::image::Handle>,
) -> Element<'a, Message> {
    let original_pane = column![
        text("Original Image").size(14),
        pane(Image::new(original.clone())
            .width(Length::Fill)
            .height(Length::Fixed(PANE_HEIGHT))
            .content_fit(ContentFit::Cover)
            .into()),
    ]
    .spacing(12)
    .width(Length::FillPortion(1));

    let overlay_pane = match overlay {
        Some(handle) => column![
            text("Analysis Overlay").size(14),
            pane(Image::new(handle.clone())
                .width(Length::Fill)
                .height(Length::Fixed(PANE_HEIGHT))
                .content_fit(ContentFit::Cover)
                .into()),
        ],
        None => column![
            text("Processing Complete").size(14),
            pane(
                column![
                    text("✔").size(40),
                    text("Analysis completed successfully").size(14),
                ]
                .spacing(8)
                .align_x(Alignment::Center)
                .into()
            ),
        ],
    }
    .spacing(12)
    .width(Length::FillPortion(1));

    card(
        column![
            text("Image Analysis").size(20),
            row![original_pane, overlay_pane].spacing(24),
        ]
        .spacing(16),
    )
    .into()
}

fn pane(content: Element<'_, Message>) -> Element<'_, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fixed(PANE_HEIGHT))
        .align_x(Alignment::Center)
        .align_y(Alignment::Center)
        .style(container::bordered_box)
        .into()
}
