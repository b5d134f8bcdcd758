use crate::client::AnalysisReport;
use crate::error::{AnalysisError, UploadError};
use crate::model::ImageFile;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Message {
    PickImage,
    ImageChosen(Option<PathBuf>),
    FileHovered,
    FilesHoveredLeft,
    FileDropped(PathBuf),
    ImageLoaded(Result<ImageFile, UploadError>),
    RemoveImage,
    Analyze,
    AnalysisFinished(u64, Result<AnalysisReport, AnalysisError>),
    Reset,
    DismissNotice,
    SpinnerTick,
}
