use crate::common_types::{AllowedCharacters, RecognizedText};
use crate::AppResult;
use std::path::PathBuf;

#[cfg(feature = "ocr")]
mod ocrs_engine;
#[cfg(feature = "ocr")]
pub use ocrs_engine::OcrsEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrPhase {
    LoadingEngine,
    Initializing,
    LoadingLanguageData,
    Recognizing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OcrProgress {
    pub phase: OcrPhase,
    pub progress: f32,
}

impl OcrProgress {
    pub fn new(phase: OcrPhase, progress: f32) -> Self {
        Self {
            phase,
            progress: progress.clamp(0.0, 1.0),
        }
    }

    pub fn percent(&self) -> u32 {
        (self.progress * 100.0).round() as u32
    }

    pub fn status_message(&self) -> String {
        let label = match self.phase {
            OcrPhase::LoadingEngine => "Loading core",
            OcrPhase::Initializing => "Initializing",
            OcrPhase::LoadingLanguageData => "Loading language data",
            OcrPhase::Recognizing => "Recognizing",
        };
        format!("{}: {}%", label, self.percent())
    }
}

pub trait OcrProgressListener {
    fn on_progress(&self, progress: OcrProgress);
}

#[derive(Debug, Clone, Default)]
pub struct OcrOptions {
    pub allowed_characters: AllowedCharacters,
    pub models_dir: Option<PathBuf>,
}

pub trait Ocr {
    fn image_to_text(
        &self,
        image: &image::DynamicImage,
        listener: &dyn OcrProgressListener,
    ) -> AppResult<RecognizedText>;
}
