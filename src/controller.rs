//! Upload → analyze → display lifecycle.
//!
//! The controller is the only owner of the selected image and its display
//! URL. At most one analysis request is in flight per controller; a request
//! that outlives a reset is drained and its outcome discarded.

use crate::client::{AnalysisReport, AnalysisRequest};
use crate::config::Config;
use crate::error::{AnalysisError, UploadError};
use crate::model::{
    is_accepted_mime, AnalysisResult, DisplayUrl, ImageFile, Notice, PreviewTracker,
    ResultSummary, SelectedImage,
};
use crate::utils::human_size;
use iced::widget::image::Handle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Selected,
    Analyzing,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAnalysis {
    pub attempt: u64,
    pub request: AnalysisRequest,
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    attempt: u64,
    abandoned: bool,
}

#[derive(Debug)]
pub struct AnalysisController {
    config: Config,
    previews: PreviewTracker,
    selection: Option<SelectedImage>,
    in_flight: Option<InFlight>,
    next_attempt: u64,
    result: Option<AnalysisResult>,
    overlay: Option<Handle>,
    notice: Option<Notice>,
}

impl AnalysisController {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            previews: PreviewTracker::default(),
            selection: None,
            in_flight: None,
            next_attempt: 0,
            result: None,
            overlay: None,
            notice: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        if self.selection.is_none() {
            Phase::Empty
        } else if self.in_flight.is_some_and(|flight| !flight.abandoned) {
            Phase::Analyzing
        } else if self.result.is_some() {
            Phase::Completed
        } else {
            Phase::Selected
        }
    }

    /// True while any request is outstanding, including one abandoned by a
    /// reset that has not settled yet.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn can_analyze(&self) -> bool {
        self.phase() == Phase::Selected && self.in_flight.is_none()
    }

    pub fn selection(&self) -> Option<&SelectedImage> {
        self.selection.as_ref()
    }

    pub fn display_url(&self) -> Option<&DisplayUrl> {
        self.selection.as_ref().map(|selected| &selected.display_url)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn overlay(&self) -> Option<&Handle> {
        self.overlay.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Number of display URLs that have not been released yet.
    pub fn live_previews(&self) -> usize {
        self.previews.live()
    }

    /// Accepts a JPEG or PNG and makes it the current selection, releasing
    /// any previous one. Returns `false` when the file was ignored.
    pub fn submit_image(&mut self, file: ImageFile) -> bool {
        if !is_accepted_mime(&file.mime) {
            log::debug!("Ignoring {} ({})", file.file_name, file.mime);
            return false;
        }
        if self.is_loading() {
            log::debug!("Ignoring {} while an analysis is running", file.file_name);
            return false;
        }

        log::info!(
            "Selected {} ({}, {})",
            file.file_name,
            file.mime,
            human_size(file.size())
        );
        if file.exceeds_advisory_limit() {
            log::warn!(
                "{} is larger than the advised 10MB limit ({})",
                file.file_name,
                human_size(file.size())
            );
        }

        self.release_selection();
        let display_url = self.previews.acquire(&file);
        self.selection = Some(SelectedImage { file, display_url });
        self.notice = Some(Notice::info(
            "Image uploaded successfully",
            "Ready for analysis",
        ));
        true
    }

    /// Surfaces a failed upload. Rejected file types stay silent.
    pub fn report_upload_error(&mut self, error: &UploadError) {
        if error.is_silent() {
            return;
        }
        log::warn!("{error}");
        self.notice = Some(Notice::warning("Could not read image", error.to_string()));
    }

    /// Removes the selected image. Ignored while an analysis is running.
    pub fn remove_image(&mut self) {
        if self.is_loading() {
            log::debug!("Remove ignored while an analysis is running");
            return;
        }
        self.release_selection();
    }

    /// Clears everything, including an in-flight analysis whose outcome will
    /// be discarded when it settles.
    pub fn reset(&mut self) {
        if let Some(flight) = self.in_flight.as_mut() {
            flight.abandoned = true;
        }
        self.release_selection();
        self.notice = None;
    }

    /// Moves `Selected` to `Analyzing` and hands back the request to send.
    pub fn begin_analysis(&mut self) -> Option<PendingAnalysis> {
        if !self.can_analyze() {
            return None;
        }
        let selected = self.selection.as_ref()?;

        self.next_attempt += 1;
        let attempt = self.next_attempt;
        self.in_flight = Some(InFlight {
            attempt,
            abandoned: false,
        });
        log::info!(
            "Analysis #{attempt} started for {} via {}",
            selected.file.file_name,
            self.config.endpoint
        );

        Some(PendingAnalysis {
            attempt,
            request: AnalysisRequest::from(&selected.file),
        })
    }

    /// Settles the attempt started by [`begin_analysis`](Self::begin_analysis).
    pub fn finish_analysis(
        &mut self,
        attempt: u64,
        outcome: Result<AnalysisReport, AnalysisError>,
    ) {
        match self.in_flight {
            Some(flight) if flight.attempt == attempt => {
                self.in_flight = None;
                if flight.abandoned {
                    log::debug!("Discarding outcome of abandoned analysis #{attempt}");
                    return;
                }
            }
            _ => {
                log::debug!("Ignoring outcome of unknown analysis #{attempt}");
                return;
            }
        }

        match outcome {
            Ok(report) => {
                let summary = ResultSummary::from_result(&report.result);
                let headline = summary.headline();
                log::info!("Analysis #{attempt} completed: {headline}");

                self.overlay = report.overlay.map(Handle::from_bytes);
                self.result = Some(report.result);
                self.notice = Some(Notice::info("Analysis completed", headline));
            }
            Err(err) => {
                log::error!("Analysis failed: {err}");
                self.overlay = None;
                if self.config.demo_fallback {
                    log::warn!("Substituting demo result for analysis #{attempt}");
                    self.result = Some(AnalysisResult::fallback());
                    self.notice = Some(Notice::warning(
                        "Analysis failed",
                        "Could not connect to analysis server. Showing demo results.",
                    ));
                } else {
                    self.result = None;
                    self.notice = Some(Notice::warning(
                        "Analysis failed",
                        "Could not connect to analysis server.",
                    ));
                }
            }
        }
    }

    fn release_selection(&mut self) {
        if let Some(selected) = self.selection.take() {
            log::info!("Cleared {}", selected.file.file_name);
        }
        self.result = None;
        self.overlay = None;
    }
}
