use crate::capture::{CapturedFrame, FrameSource};
use crate::errors::AppError;
use crate::reporter::AppReporter;
use crate::AppResult;
use arboard::Clipboard;

pub struct ClipboardFrameSource<'a> {
    clipboard: Clipboard,
    reporter: &'a AppReporter<'a>,
}

impl<'a> ClipboardFrameSource<'a> {
    pub async fn new(source_path: &str, reporter: &'a AppReporter<'a>) -> AppResult<Self> {
        if source_path != "clipboard://" {
            return Err(AppError::UnknownCaptureSource {
                source_path: source_path.to_string(),
            });
        }
        let clipboard = Clipboard::new().map_err(|err| AppError::CaptureError {
            source_path: source_path.to_string(),
            message: err.to_string(),
        })?;
        Ok(Self {
            clipboard,
            reporter,
        })
    }
}

impl FrameSource for ClipboardFrameSource<'_> {
    async fn capture(&mut self) -> AppResult<CapturedFrame> {
        self.reporter.status("Reading image from clipboard")?;
        let image_data = self
            .clipboard
            .get()
            .image()
            .map_err(|err| AppError::CaptureError {
                source_path: self.describe(),
                message: err.to_string(),
            })?;
        let maybe_image: Option<image::RgbaImage> = image::ImageBuffer::from_raw(
            image_data.width as u32,
            image_data.height as u32,
            image_data.bytes.into_owned(),
        );
        match maybe_image {
            Some(image) => Ok(CapturedFrame::new(
                image::DynamicImage::ImageRgba8(image),
                self.describe(),
            )),
            None => Err(AppError::CaptureError {
                source_path: self.describe(),
                message: "Clipboard can't get any supported image format from clipboard://"
                    .to_string(),
            }),
        }
    }

    fn describe(&self) -> String {
        "clipboard://".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicatif::ProgressBar;

    #[tokio::test]
    async fn rejects_clipboard_paths_test() {
        let bar = ProgressBar::hidden();
        let reporter: AppReporter = AppReporter::from(&bar);
        let result = ClipboardFrameSource::new("clipboard://latest", &reporter).await;
        assert!(matches!(
            result,
            Err(AppError::UnknownCaptureSource { .. })
        ));
    }

    #[tokio::test]
    #[cfg_attr(not(feature = "ci-clipboard"), ignore)]
    async fn capture_clipboard_image_test() -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    {
        let bar = ProgressBar::hidden();
        let reporter: AppReporter = AppReporter::from(&bar);
        let mut clipboard = Clipboard::new()?;
        clipboard.set_image(arboard::ImageData {
            width: 2,
            height: 1,
            bytes: vec![255u8, 0, 0, 255, 0, 255, 0, 255].into(),
        })?;

        let mut source = ClipboardFrameSource::new("clipboard://", &reporter).await?;
        let frame = source.capture().await?;
        assert_eq!(frame.image.width(), 2);
        assert_eq!(frame.image.height(), 1);
        assert_eq!(frame.origin, "clipboard://");
        Ok(())
    }
}
