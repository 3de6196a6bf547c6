use crate::ocr::{OcrProgress, OcrProgressListener};
use crate::AppResult;
use console::Term;
use indicatif::ProgressBar;

#[derive(Debug, Clone)]
pub struct AppReporter<'a> {
    inner: AppReporterInner<'a>,
}

impl<'a> AppReporter<'a> {
    pub fn report<S>(&self, message: S) -> AppResult<()>
    where
        S: AsRef<str>,
    {
        match &self.inner {
            AppReporterInner::Term(term) => Ok(term.write_line(message.as_ref())?),
            AppReporterInner::ProgressBar(progress_bar) => {
                progress_bar.println(message.as_ref());
                Ok(())
            }
        }
    }

    /// Replaces the current status line. Terminals without a progress bar get a new line instead.
    pub fn status<S>(&self, message: S) -> AppResult<()>
    where
        S: AsRef<str>,
    {
        tracing::debug!(status = message.as_ref());
        match &self.inner {
            AppReporterInner::Term(term) => Ok(term.write_line(message.as_ref())?),
            AppReporterInner::ProgressBar(progress_bar) => {
                progress_bar.set_message(message.as_ref().to_string());
                Ok(())
            }
        }
    }
}

impl OcrProgressListener for AppReporter<'_> {
    fn on_progress(&self, progress: OcrProgress) {
        if let AppReporterInner::ProgressBar(progress_bar) = &self.inner {
            progress_bar.set_position(progress.percent() as u64);
        }
        if let Err(err) = self.status(progress.status_message()) {
            tracing::warn!("Unable to report OCR progress: {}", err);
        }
    }
}

#[derive(Debug, Clone)]
enum AppReporterInner<'a> {
    Term(&'a Term),
    ProgressBar(&'a ProgressBar),
}

impl<'a> From<&'a Term> for AppReporter<'a> {
    fn from(term: &'a Term) -> Self {
        AppReporter {
            inner: AppReporterInner::Term(term),
        }
    }
}

impl<'a> From<&'a ProgressBar> for AppReporter<'a> {
    fn from(progress_bar: &'a ProgressBar) -> Self {
        AppReporter {
            inner: AppReporterInner::ProgressBar(progress_bar),
        }
    }
}
