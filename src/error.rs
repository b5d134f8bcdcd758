use std::path::PathBuf;

/// Failures of a single analysis attempt. Every variant is handled the same
/// way by the controller: logged, surfaced as a warning, and masked.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("request to analysis server failed: {0}")]
    Request(String),

    #[error("analysis server responded with status {status}")]
    Status { status: u16, body: String },

    #[error("analysis response could not be parsed: {0}")]
    Parse(String),

    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UploadError {
    /// Not one of the accepted image types. Dropped without user feedback.
    #[error("{}: unsupported file type ({})", path.display(), mime.as_deref().unwrap_or("unknown"))]
    UnsupportedType { path: PathBuf, mime: Option<String> },

    #[error("{}: failed to read image ({reason})", path.display())]
    Read { path: PathBuf, reason: String },
}

impl UploadError {
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::UnsupportedType { .. })
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OverlayError {
    #[error("invalid data URI: {0}")]
    InvalidDataUri(String),

    #[error("overlay fetch failed: {0}")]
    Fetch(String),

    #[error("unsupported overlay reference: {0}")]
    Unsupported(String),
}
