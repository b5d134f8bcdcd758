use crate::error::UploadError;
use iced::widget::image::Handle;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const ACCEPTED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

/// Shown next to the drop zone; uploads larger than this are only warned about.
pub const ADVISORY_MAX_BYTES: u64 = 10 * 1024 * 1024;

pub fn is_accepted_mime(mime: &str) -> bool {
    ACCEPTED_MIME_TYPES
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(mime.trim()))
}

pub fn mime_from_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        "dcm" => "application/dicom",
        _ => return None,
    };
    Some(mime)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub path: PathBuf,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Reads an image from disk after checking its type. The type check runs
    /// first so rejected files are never read.
    pub async fn load(path: PathBuf) -> Result<Self, UploadError> {
        let mime = mime_from_path(&path);
        let Some(mime) = mime.filter(|mime| is_accepted_mime(mime)) else {
            log::debug!("Ignoring {} ({})", path.display(), mime.unwrap_or("unknown"));
            return Err(UploadError::UnsupportedType {
                path,
                mime: mime.map(str::to_string),
            });
        };

        let bytes = tokio::fs::read(&path).await.map_err(|err| {
            let error = UploadError::Read {
                path: path.clone(),
                reason: err.to_string(),
            };
            log::error!("{error}");
            error
        })?;

        Ok(Self::from_bytes(path, mime, bytes))
    }

    pub fn from_bytes(path: PathBuf, mime: &str, bytes: Vec<u8>) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        Self {
            path,
            file_name,
            mime: mime.to_string(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn exceeds_advisory_limit(&self) -> bool {
        self.size() > ADVISORY_MAX_BYTES
    }
}

/// Hands out display URLs and counts how many are still alive.
#[derive(Debug, Default)]
pub struct PreviewTracker {
    next_id: u64,
    live: Arc<AtomicUsize>,
}

impl PreviewTracker {
    pub fn acquire(&mut self, file: &ImageFile) -> DisplayUrl {
        self.next_id += 1;
        let uri = format!("preview://{}/{}", self.next_id, file.file_name);
        self.live.fetch_add(1, Ordering::SeqCst);
        log::debug!("Created display URL {uri}");

        DisplayUrl {
            handle: Handle::from_bytes(file.bytes.clone()),
            lease: PreviewLease {
                uri,
                live: Arc::clone(&self.live),
            },
        }
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

/// A revocable reference to the preview of a selected image. Dropping it
/// releases the reference.
#[derive(Debug)]
pub struct DisplayUrl {
    handle: Handle,
    lease: PreviewLease,
}

impl DisplayUrl {
    pub fn as_str(&self) -> &str {
        &self.lease.uri
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }
}

#[derive(Debug)]
struct PreviewLease {
    uri: String,
    live: Arc<AtomicUsize>,
}

impl Drop for PreviewLease {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
        log::debug!("Released display URL {}", self.uri);
    }
}

/// The chosen file together with its display URL.
#[derive(Debug)]
pub struct SelectedImage {
    pub file: ImageFile,
    pub display_url: DisplayUrl,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str) -> ImageFile {
        ImageFile::from_bytes(PathBuf::from(name), "image/png", vec![0x89, b'P', b'N', b'G'])
    }

    #[test]
    fn accepts_only_jpeg_and_png() {
        assert!(is_accepted_mime("image/jpeg"));
        assert!(is_accepted_mime("image/jpg"));
        assert!(is_accepted_mime("IMAGE/PNG"));
        assert!(!is_accepted_mime("image/gif"));
        assert!(!is_accepted_mime("application/dicom"));
        assert!(!is_accepted_mime(""));
    }

    #[test]
    fn mime_is_derived_from_extension() {
        assert_eq!(mime_from_path(Path::new("fundus.JPG")), Some("image/jpeg"));
        assert_eq!(mime_from_path(Path::new("oct.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_from_path(Path::new("scan.png")), Some("image/png"));
        assert_eq!(mime_from_path(Path::new("scan.gif")), Some("image/gif"));
        assert_eq!(mime_from_path(Path::new("notes")), None);
        assert_eq!(mime_from_path(Path::new("report.pdf")), None);
    }

    #[test]
    fn display_urls_are_released_on_drop() {
        let mut tracker = PreviewTracker::default();
        let first = tracker.acquire(&png("left.png"));
        let second = tracker.acquire(&png("right.png"));

        assert_eq!(first.as_str(), "preview://1/left.png");
        assert_eq!(second.as_str(), "preview://2/right.png");
        assert_eq!(tracker.live(), 2);

        drop(first);
        assert_eq!(tracker.live(), 1);
        drop(second);
        assert_eq!(tracker.live(), 0);
    }

    #[test]
    fn advisory_limit_is_not_enforced() {
        let file = ImageFile::from_bytes(
            PathBuf::from("large.png"),
            "image/png",
            vec![0; ADVISORY_MAX_BYTES as usize + 1],
        );
        assert!(file.exceeds_advisory_limit());
        assert!(!png("small.png").exceeds_advisory_limit());
    }
}
