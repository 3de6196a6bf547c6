use crate::common_types::{AllowedCharacters, RecognizedText};
use crate::errors::AppError;
use crate::ocr::{Ocr, OcrOptions, OcrPhase, OcrProgress, OcrProgressListener};
use crate::AppResult;
use ocrs::{ImageSource, OcrEngine, OcrEngineParams, OcrInput, TextItem};
use rvstruct::ValueStruct;
use std::path::{Path, PathBuf};

/// Local OCR engine backed by the `ocrs` detection and recognition models.
///
/// Loading the models is the expensive part, so one engine is built at startup
/// and reused by every scan attempt. Recognised characters outside the configured
/// allowed set never reach the returned text.
pub struct OcrsEngine {
    ocr_engine: OcrEngine,
    allowed_characters: AllowedCharacters,
}

impl std::fmt::Debug for OcrsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OcrsEngine")
            .field("allowed_characters", &self.allowed_characters)
            .finish_non_exhaustive()
    }
}

impl OcrsEngine {
    const DETECTION_MODEL_FILE: &'static str = "text-detection.rten";
    const RECOGNITION_MODEL_FILE: &'static str = "text-recognition.rten";
    const LINES_PER_PROGRESS_STEP: usize = 4;

    pub fn new(options: &OcrOptions, listener: &dyn OcrProgressListener) -> AppResult<Self> {
        let models_dir = match &options.models_dir {
            Some(models_dir) if models_dir.exists() => models_dir.clone(),
            Some(models_dir) => {
                return Err(AppError::OcrModelError {
                    message: format!(
                        "Models directory doesn't exist: {}",
                        models_dir.to_string_lossy()
                    ),
                })
            }
            None => Self::find_models_dir()?,
        };
        tracing::info!("Loading OCR models from {}", models_dir.to_string_lossy());

        listener.on_progress(OcrProgress::new(OcrPhase::LoadingEngine, 0.0));
        let detection_model = Self::load_model(&models_dir.join(Self::DETECTION_MODEL_FILE))?;
        listener.on_progress(OcrProgress::new(OcrPhase::LoadingEngine, 1.0));

        listener.on_progress(OcrProgress::new(OcrPhase::LoadingLanguageData, 0.0));
        let recognition_model =
            Self::load_model(&models_dir.join(Self::RECOGNITION_MODEL_FILE))?;
        listener.on_progress(OcrProgress::new(OcrPhase::LoadingLanguageData, 1.0));

        listener.on_progress(OcrProgress::new(OcrPhase::Initializing, 0.0));
        let ocr_engine = OcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })?;
        tracing::debug!(
            allowed_characters = options.allowed_characters.value().as_str(),
            "OCR engine initialized"
        );
        listener.on_progress(OcrProgress::new(OcrPhase::Initializing, 1.0));

        Ok(Self {
            ocr_engine,
            allowed_characters: options.allowed_characters.clone(),
        })
    }

    fn load_model(model_path: &Path) -> AppResult<rten::Model> {
        rten::Model::load_file(model_path).map_err(|err| AppError::OcrModelError {
            message: format!("{}: {}", model_path.to_string_lossy(), err),
        })
    }

    fn find_models_dir() -> AppResult<PathBuf> {
        let executable = std::env::current_exe()?;
        let current_dir = executable.parent().map(|p| p.to_path_buf());

        [
            current_dir.clone().map(|p| p.join("models").join("ocrs")),
            current_dir.and_then(|p| p.parent().map(|p| p.join("share").join("ocrs"))),
            dirs::home_dir().map(|p| p.join(".cache").join("ocrs")),
        ]
        .into_iter()
        .flatten()
        .find(|p| p.exists())
        .ok_or_else(|| AppError::OcrModelError {
            message: "Could not find OCR models directory".to_string(),
        })
    }
}

impl Ocr for OcrsEngine {
    fn image_to_text(
        &self,
        image: &image::DynamicImage,
        listener: &dyn OcrProgressListener,
    ) -> AppResult<RecognizedText> {
        listener.on_progress(OcrProgress::new(OcrPhase::Recognizing, 0.0));
        let rgb_image = image.to_rgb8();
        let image_source = ImageSource::from_bytes(rgb_image.as_raw(), rgb_image.dimensions())
            .map_err(|err| AppError::OcrEngineError {
                message: format!("Unsupported image layout: {:?}", err),
            })?;
        let input: OcrInput = self.ocr_engine.prepare_input(image_source)?;
        let word_rects = self.ocr_engine.detect_words(&input)?;
        let line_rects = self.ocr_engine.find_text_lines(&input, &word_rects);

        let total_lines = line_rects.len().max(1);
        let mut lines_done = 0;
        let mut recognized_lines: Vec<String> = Vec::with_capacity(line_rects.len());
        for line_chunk in line_rects.chunks(Self::LINES_PER_PROGRESS_STEP) {
            for text_line in self
                .ocr_engine
                .recognize_text(&input, line_chunk)?
                .into_iter()
                .flatten()
            {
                recognized_lines.push(
                    self.allowed_characters
                        .retain_allowed(text_line.chars().into_iter().map(|c| c.char)),
                );
            }
            lines_done += line_chunk.len();
            listener.on_progress(OcrProgress::new(
                OcrPhase::Recognizing,
                lines_done as f32 / total_lines as f32,
            ));
        }
        listener.on_progress(OcrProgress::new(OcrPhase::Recognizing, 1.0));

        Ok(RecognizedText::new(recognized_lines.join("\n")))
    }
}
