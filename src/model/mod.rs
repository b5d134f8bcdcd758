pub mod analysis;
pub mod notice;
pub mod selection;
pub mod summary;

pub use analysis::{AdditionalInfo, AnalysisResult, Severity, SeverityTone, DEFAULT_DISEASE_NAME};
pub use notice::{Notice, NoticeKind};
pub use selection::{
    is_accepted_mime, mime_from_path, DisplayUrl, ImageFile, PreviewTracker, SelectedImage,
    ACCEPTED_MIME_TYPES, ADVISORY_MAX_BYTES,
};
pub use summary::ResultSummary;
