use crate::capture::{CapturedFrame, FrameSource};
use crate::errors::AppError;
use crate::reporter::AppReporter;
use crate::AppResult;
use mime::Mime;
use std::path::PathBuf;

pub struct LocalFrameSource<'a> {
    file_path: PathBuf,
    media_type: Mime,
    reporter: &'a AppReporter<'a>,
}

impl<'a> LocalFrameSource<'a> {
    pub async fn new(source_path: &str, reporter: &'a AppReporter<'a>) -> AppResult<Self> {
        let file_path = PathBuf::from(source_path.trim_start_matches("file://"));
        let capture_error = |message: &str| AppError::CaptureError {
            source_path: source_path.to_string(),
            message: message.to_string(),
        };
        let metadata = tokio::fs::metadata(&file_path)
            .await
            .map_err(|err| capture_error(&err.to_string()))?;
        if !metadata.is_file() {
            return Err(capture_error("not a file"));
        }
        let media_type = mime_guess::from_path(&file_path)
            .first()
            .filter(|media_type| media_type.type_() == mime::IMAGE)
            .ok_or_else(|| capture_error("not an image file"))?;
        Ok(LocalFrameSource {
            file_path,
            media_type,
            reporter,
        })
    }

    async fn read_frame(&self) -> AppResult<CapturedFrame> {
        let bytes = tokio::fs::read(&self.file_path).await?;
        let image = match image::ImageFormat::from_mime_type(&self.media_type) {
            Some(image_format) => image::load_from_memory_with_format(&bytes, image_format)?,
            None => image::load_from_memory(&bytes)?,
        };
        Ok(CapturedFrame::new(image, self.describe()))
    }
}

impl FrameSource for LocalFrameSource<'_> {
    async fn capture(&mut self) -> AppResult<CapturedFrame> {
        self.reporter.status(format!(
            "Reading {} ({})",
            self.file_path.to_string_lossy(),
            self.media_type
        ))?;
        self.read_frame()
            .await
            .map_err(|err| AppError::CaptureError {
                source_path: self.describe(),
                message: err.to_string(),
            })
    }

    fn describe(&self) -> String {
        self.file_path.to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::DetectFrameSource;
    use indicatif::ProgressBar;

    #[tokio::test]
    async fn capture_png_test() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let bar = ProgressBar::hidden();
        let reporter: AppReporter = AppReporter::from(&bar);
        let temp_dir = tempfile::TempDir::with_prefix("local_frame_source_tests_capture")?;
        let image_path = temp_dir.path().join("label.png");
        image::RgbImage::from_pixel(64, 32, image::Rgb([255, 255, 255])).save(&image_path)?;

        let mut source = DetectFrameSource::open(
            &format!("file://{}", image_path.to_string_lossy()),
            &reporter,
        )
        .await?;
        let frame = source.capture().await?;
        assert_eq!(frame.image.width(), 64);
        assert_eq!(frame.image.height(), 32);
        assert_eq!(frame.origin, image_path.to_string_lossy());

        Ok(())
    }

    #[tokio::test]
    async fn rejects_missing_and_non_image_files_test(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let bar = ProgressBar::hidden();
        let reporter: AppReporter = AppReporter::from(&bar);
        let temp_dir = tempfile::TempDir::with_prefix("local_frame_source_tests_reject")?;

        let missing = temp_dir.path().join("missing.png");
        let result = DetectFrameSource::open(&missing.to_string_lossy(), &reporter).await;
        assert!(matches!(result, Err(ref err) if err.is_capture_failure()));

        let text_file = temp_dir.path().join("notes.txt");
        tokio::fs::write(&text_file, "SPD3303X-E").await?;
        let result = DetectFrameSource::open(&text_file.to_string_lossy(), &reporter).await;
        assert!(matches!(result, Err(ref err) if err.is_capture_failure()));

        let result = DetectFrameSource::open(&temp_dir.path().to_string_lossy(), &reporter).await;
        assert!(matches!(result, Err(ref err) if err.is_capture_failure()));

        Ok(())
    }

    #[tokio::test]
    async fn corrupted_image_is_capture_failure_test(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let bar = ProgressBar::hidden();
        let reporter: AppReporter = AppReporter::from(&bar);
        let temp_dir = tempfile::TempDir::with_prefix("local_frame_source_tests_corrupted")?;
        let image_path = temp_dir.path().join("broken.png");
        tokio::fs::write(&image_path, b"definitely not a png").await?;

        let mut source = DetectFrameSource::open(&image_path.to_string_lossy(), &reporter).await?;
        let result = source.capture().await;
        assert!(matches!(result, Err(AppError::CaptureError { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_scheme_test() {
        let bar = ProgressBar::hidden();
        let reporter: AppReporter = AppReporter::from(&bar);
        let result = DetectFrameSource::open("camera://0", &reporter).await;
        assert!(matches!(
            result,
            Err(AppError::UnknownCaptureSource { .. })
        ));
    }
}
