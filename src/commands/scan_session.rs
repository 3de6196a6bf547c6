use crate::capture::FrameSource;
use crate::common_types::{RecognizedText, RedirectDelay};
use crate::matching::{MatchPolicy, ModelMatch, ModelMatcher, ModelMatcherResult};
use crate::navigation::Navigator;
use crate::ocr::Ocr;
use crate::registry::ModelRegistry;
use crate::reporter::AppReporter;
use crate::AppResult;
use console::Style;
use rvstruct::ValueStruct;

#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    Redirected(ModelMatch),
    NoMatch { recognized_text: RecognizedText },
    RecognitionFailed { message: String },
}

#[derive(Debug, Clone)]
pub struct ScanCommandResult {
    pub attempts: usize,
    pub outcome: ScanOutcome,
}

/// One capture-recognize-match cycle at a time over a shared OCR engine.
///
/// Capture failures are returned as errors and end the session. Recognition failures and
/// unmatched text are reported as outcomes so the caller can offer another attempt.
pub struct ScanSession<'a, O: Ocr, N: Navigator> {
    matcher: ModelMatcher<'a>,
    ocr: &'a O,
    navigator: &'a N,
    reporter: &'a AppReporter<'a>,
    redirect_delay: RedirectDelay,
}

impl<'a, O: Ocr, N: Navigator> ScanSession<'a, O, N> {
    pub fn new(
        registry: &'a ModelRegistry,
        match_policy: MatchPolicy,
        ocr: &'a O,
        navigator: &'a N,
        reporter: &'a AppReporter<'a>,
        redirect_delay: RedirectDelay,
    ) -> Self {
        Self {
            matcher: ModelMatcher::new(registry, match_policy),
            ocr,
            navigator,
            reporter,
            redirect_delay,
        }
    }

    /// Repeats attempts until a model is redirected to or no further attempt is wanted.
    /// `retry_prompt` is asked after a retryable outcome, and only in interactive mode.
    pub async fn run<S, R>(
        &self,
        source: &mut S,
        interactive: bool,
        mut retry_prompt: R,
    ) -> AppResult<ScanCommandResult>
    where
        S: FrameSource,
        R: FnMut() -> AppResult<bool>,
    {
        let mut attempts = 0;
        loop {
            attempts += 1;
            tracing::info!(attempt = attempts, "Starting scan attempt");
            let outcome = self.attempt(source).await?;
            let retry = match outcome {
                ScanOutcome::Redirected(_) => false,
                ScanOutcome::NoMatch { .. } | ScanOutcome::RecognitionFailed { .. } => {
                    interactive && retry_prompt()?
                }
            };
            if !retry {
                return Ok(ScanCommandResult { attempts, outcome });
            }
        }
    }

    pub async fn attempt<S: FrameSource>(&self, source: &mut S) -> AppResult<ScanOutcome> {
        let frame = source.capture().await?;
        tracing::info!(
            origin = frame.origin.as_str(),
            captured_at = %frame.captured_at,
            width = frame.image.width(),
            height = frame.image.height(),
            "Captured frame"
        );

        self.reporter.status("Recognizing text...")?;
        let recognized_text = match self.ocr.image_to_text(&frame.image, self.reporter) {
            Ok(recognized_text) => recognized_text,
            Err(err) => {
                tracing::error!("OCR recognition failed: {}", err);
                self.reporter.report(
                    Style::new()
                        .red()
                        .apply_to("Recognition failed, please try again.")
                        .to_string(),
                )?;
                return Ok(ScanOutcome::RecognitionFailed {
                    message: err.to_string(),
                });
            }
        };
        tracing::debug!(text = recognized_text.value().as_str(), "Recognized text");

        match self.matcher.matches(recognized_text.value()) {
            ModelMatcherResult::Matched(model_match) => {
                let bold_style = Style::new().bold();
                self.reporter.report(format!(
                    "Recognized model: {}",
                    bold_style.clone().green().apply_to(model_match.model_id.value())
                ))?;
                self.reporter.report(format!(
                    "Recognition complete, redirecting to: {}",
                    bold_style.apply_to(&model_match.url)
                ))?;
                tokio::time::sleep(self.redirect_delay.0).await;
                self.navigator.navigate(&model_match.url)?;
                Ok(ScanOutcome::Redirected(model_match))
            }
            ModelMatcherResult::NoMatch => {
                tracing::info!("No registered device model found in the recognized text");
                self.reporter.report(
                    Style::new()
                        .yellow()
                        .apply_to("No valid device model recognized, please try capturing again.")
                        .to_string(),
                )?;
                self.reporter.report(format!(
                    "Recognized text (unmatched): {}",
                    if recognized_text.is_blank() {
                        "none"
                    } else {
                        recognized_text.value().as_str()
                    }
                ))?;
                Ok(ScanOutcome::NoMatch { recognized_text })
            }
        }
    }
}
