use crate::errors::AppError;
use crate::reporter::AppReporter;
use crate::AppResult;
use chrono::{DateTime, Utc};

mod local;
pub use local::LocalFrameSource;

#[cfg(feature = "clipboard")]
mod clipboard;

/// A still image taken from a capture source, already decoded to pixels.
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    pub image: image::DynamicImage,
    pub origin: String,
    pub captured_at: DateTime<Utc>,
}

impl CapturedFrame {
    pub fn new(image: image::DynamicImage, origin: String) -> Self {
        Self {
            image,
            origin,
            captured_at: Utc::now(),
        }
    }
}

pub trait FrameSource {
    async fn capture(&mut self) -> AppResult<CapturedFrame>;

    fn describe(&self) -> String;
}

pub enum DetectFrameSource<'a> {
    Local(LocalFrameSource<'a>),
    #[cfg(feature = "clipboard")]
    Clipboard(clipboard::ClipboardFrameSource<'a>),
}

impl<'a> DetectFrameSource<'a> {
    pub async fn open(source_path: &str, reporter: &'a AppReporter<'a>) -> AppResult<Self> {
        if source_path.starts_with("file://") || !source_path.contains("://") {
            Ok(DetectFrameSource::Local(
                LocalFrameSource::new(source_path, reporter).await?,
            ))
        } else if source_path.starts_with("clipboard://") {
            #[cfg(feature = "clipboard")]
            {
                Ok(DetectFrameSource::Clipboard(
                    clipboard::ClipboardFrameSource::new(source_path, reporter).await?,
                ))
            }
            #[cfg(not(feature = "clipboard"))]
            {
                Err(AppError::UnknownCaptureSource {
                    source_path: source_path.to_string(),
                })
            }
        } else {
            Err(AppError::UnknownCaptureSource {
                source_path: source_path.to_string(),
            })
        }
    }
}

impl FrameSource for DetectFrameSource<'_> {
    async fn capture(&mut self) -> AppResult<CapturedFrame> {
        match self {
            DetectFrameSource::Local(source) => source.capture().await,
            #[cfg(feature = "clipboard")]
            DetectFrameSource::Clipboard(source) => source.capture().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            DetectFrameSource::Local(source) => source.describe(),
            #[cfg(feature = "clipboard")]
            DetectFrameSource::Clipboard(source) => source.describe(),
        }
    }
}
