use indicatif::style::TemplateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unknown capture source is specified: {source_path}")]
    UnknownCaptureSource { source_path: String },
    #[error("Unable to access capture source '{source_path}': {message}")]
    CaptureError {
        source_path: String,
        message: String,
    },
    #[error("Input/output error")]
    InputOutputError(#[from] std::io::Error),
    #[error("Image conversion error: {0}")]
    ImageError(#[from] image::ImageError),
    #[error("OCR engine error: {message}")]
    OcrEngineError { message: String },
    #[error("OCR model error: {message}")]
    OcrModelError { message: String },
    #[error("Model registry config error: {message}")]
    RegistryConfigError { message: String },
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
    #[error("Navigation to {url} failed")]
    NavigationError {
        url: String,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error:\n{0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Template error: {0}")]
    TemplateError(#[from] TemplateError),
}

impl AppError {
    pub fn is_capture_failure(&self) -> bool {
        matches!(
            self,
            AppError::UnknownCaptureSource { .. } | AppError::CaptureError { .. }
        )
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::OcrEngineError {
            message: format!("{:#}", err),
        }
    }
}
