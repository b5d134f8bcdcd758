use crate::client::AnalysisClient;
use crate::components::{card, notice_banner};
use crate::config::Config;
use crate::controller::{AnalysisController, Phase};
use crate::error::AnalysisError;
use crate::message::Message;
use crate::model::ImageFile;
use crate::views::{results_panel, upload_surface, wait_indicator};
use iced::widget::text::Wrapping;
use iced::widget::{button, column, container, horizontal_rule, row, scrollable, text, Space};
use iced::{
    application, event, time, window, Alignment, Element, Event, Length, Subscription, Task,
    Theme,
};
use rfd::AsyncFileDialog;
use std::path::PathBuf;
use std::time::Duration;

const APP_TITLE: &str = "Retinascope";
const SPINNER_INTERVAL: Duration = Duration::from_millis(120);
const DISCLAIMER: &str = "This is a demonstration of AI-powered retinal image analysis. \
Always consult with a qualified healthcare professional for medical diagnosis.";

pub fn run() -> iced::Result {
    let _ = env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .try_init();

    let config = Config::from_env().unwrap_or_else(|err| {
        log::error!("Ignoring configuration: {err}");
        Config::default()
    });

    application(APP_TITLE, App::update, App::view)
        .theme(App::theme)
        .subscription(App::subscription)
        .run_with(move || (App::new(config), Task::none()))
}

pub struct App {
    controller: AnalysisController,
    client: Result<AnalysisClient, AnalysisError>,
    drag_over: bool,
    reading_file: bool,
    spinner_frame: usize,
}

impl App {
    pub fn new(config: Config) -> Self {
        let client = AnalysisClient::new(&config);
        if let Err(err) = &client {
            log::error!("{err}");
        }

        Self {
            controller: AnalysisController::new(config),
            client,
            drag_over: false,
            reading_file: false,
            spinner_frame: 0,
        }
    }

    fn accepts_uploads(&self) -> bool {
        self.controller.phase() == Phase::Empty
            && !self.controller.is_loading()
            && !self.reading_file
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickImage => {
                if !self.accepts_uploads() {
                    return Task::none();
                }
                Task::perform(
                    async {
                        AsyncFileDialog::new()
                            .set_title("Select a retinal image")
                            .add_filter("Retinal image", &["jpeg", "jpg", "png"])
                            .pick_file()
                            .await
                            .map(|handle| handle.path().to_path_buf())
                    },
                    Message::ImageChosen,
                )
            }
            Message::ImageChosen(Some(path)) | Message::FileDropped(path) => {
                self.drag_over = false;
                self.load_image(path)
            }
            Message::ImageChosen(None) => Task::none(),
            Message::FileHovered => {
                if self.accepts_uploads() {
                    self.drag_over = true;
                }
                Task::none()
            }
            Message::FilesHoveredLeft => {
                self.drag_over = false;
                Task::none()
            }
            Message::ImageLoaded(result) => {
                self.reading_file = false;
                match result {
                    Ok(file) => {
                        self.controller.submit_image(file);
                    }
                    Err(err) => self.controller.report_upload_error(&err),
                }
                Task::none()
            }
            Message::RemoveImage => {
                self.controller.remove_image();
                Task::none()
            }
            Message::Analyze => {
                let Some(pending) = self.controller.begin_analysis() else {
                    return Task::none();
                };
                self.spinner_frame = 0;

                match &self.client {
                    Ok(client) => {
                        let client = client.clone();
                        let attempt = pending.attempt;
                        Task::perform(
                            async move { client.analyze(pending.request).await },
                            move |outcome| Message::AnalysisFinished(attempt, outcome),
                        )
                    }
                    Err(err) => {
                        self.controller
                            .finish_analysis(pending.attempt, Err(err.clone()));
                        Task::none()
                    }
                }
            }
            Message::AnalysisFinished(attempt, outcome) => {
                self.controller.finish_analysis(attempt, outcome);
                Task::none()
            }
            Message::Reset => {
                self.controller.reset();
                self.drag_over = false;
                Task::none()
            }
            Message::DismissNotice => {
                self.controller.dismiss_notice();
                Task::none()
            }
            Message::SpinnerTick => {
                self.spinner_frame = self.spinner_frame.wrapping_add(1);
                Task::none()
            }
        }
    }

    fn load_image(&mut self, path: PathBuf) -> Task<Message> {
        if !self.accepts_uploads() {
            log::debug!("Upload surface busy, ignoring {}", path.display());
            return Task::none();
        }
        self.reading_file = true;
        Task::perform(ImageFile::load(path), Message::ImageLoaded)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let file_drops = event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
            Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        });

        if self.controller.is_loading() {
            Subscription::batch([
                file_drops,
                time::every(SPINNER_INTERVAL).map(|_| Message::SpinnerTick),
            ])
        } else {
            file_drops
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let header = column![
            text("Retinal Image Analysis").size(36),
            text(
                "Upload an OCT or retinal fundus image for automated detection and analysis \
                 using advanced AI models"
            )
            .size(16)
            .wrapping(Wrapping::Word),
        ]
        .spacing(8)
        .align_x(Alignment::Center)
        .width(Length::Fill);

        let busy = self.controller.is_loading();
        let selection = self.controller.selection();

        let mut upload_title = row![text("Image Upload & Analysis")
            .size(20)
            .width(Length::Fill)]
        .align_y(Alignment::Center);
        if selection.is_some() {
            upload_title = upload_title.push(
                button(text("↻ Reset").size(14))
                    .style(button::secondary)
                    .on_press(Message::Reset),
            );
        }

        let mut upload_content = column![
            upload_title,
            upload_surface(selection, self.drag_over, busy || self.reading_file),
        ]
        .spacing(24)
        .align_x(Alignment::Center);

        if self.controller.can_analyze() {
            upload_content = upload_content.push(
                button(text("Analyze Image").size(18))
                    .padding([12, 32])
                    .on_press(Message::Analyze),
            );
        }

        let mut content = column![header].spacing(32).max_width(1152.0);

        if let Some(notice) = self.controller.notice() {
            content = content.push(notice_banner(notice));
        }

        content = content.push(card(upload_content));

        if busy {
            content = content.push(card(wait_indicator(None, self.spinner_frame)));
        }

        if let (Some(result), Some(selected)) = (self.controller.result(), selection) {
            content = content.push(
                column![
                    horizontal_rule(1),
                    text("Analysis Results").size(28),
                    text("AI-powered analysis of your retinal image").size(14),
                    results_panel(
                        result,
                        selected.display_url.handle(),
                        self.controller.overlay()
                    ),
                    button(text("↻ Analyze Another Image").size(16))
                        .padding([10, 24])
                        .style(button::secondary)
                        .on_press(Message::Reset),
                ]
                .spacing(16)
                .align_x(Alignment::Center),
            );
        }

        content = content.push(Space::with_height(Length::Fixed(32.0))).push(
            text(DISCLAIMER)
                .size(12)
                .wrapping(Wrapping::Word)
                .width(Length::Fill)
                .align_x(Alignment::Center),
        );

        scrollable(
            container(content)
                .padding(32)
                .width(Length::Fill)
                .align_x(Alignment::Center),
        )
        .into()
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}
