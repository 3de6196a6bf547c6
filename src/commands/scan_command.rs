use crate::commands::scan_session::ScanCommandResult;
use crate::common_types::RedirectDelay;
use crate::matching::MatchPolicy;
use crate::ocr::OcrOptions;
use crate::AppResult;
use console::{Style, Term};
use indicatif::*;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ScanCommandOptions {
    pub match_policy: MatchPolicy,
    pub redirect_delay: RedirectDelay,
    pub open_browser: bool,
    pub interactive: bool,
    pub ocr_options: OcrOptions,
}

pub async fn command_scan(
    term: &Term,
    source: &str,
    options: ScanCommandOptions,
) -> AppResult<ScanCommandResult> {
    let bold_style = Style::new().bold();
    term.write_line(
        format!(
            "Scanning {} for device models.\nOpening browser: {}.",
            bold_style.clone().white().apply_to(source),
            if options.open_browser {
                bold_style.clone().green().apply_to("✓ Yes")
            } else {
                bold_style.clone().yellow().apply_to("✗ No")
            }
        )
        .as_str(),
    )?;

    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos:>3}% {wide_msg}",
        )?
        .progress_chars("◉>◯"),
    );
    bar.enable_steady_tick(Duration::from_millis(100));

    let scan_result = scan_source(term, &bar, source, &options).await;
    bar.finish_and_clear();
    scan_result
}

#[cfg(feature = "ocr")]
async fn scan_source(
    term: &Term,
    bar: &ProgressBar,
    source: &str,
    options: &ScanCommandOptions,
) -> AppResult<ScanCommandResult> {
    use crate::capture::{DetectFrameSource, FrameSource};
    use crate::commands::scan_session::ScanSession;
    use crate::navigation::Navigators;
    use crate::ocr::OcrsEngine;
    use crate::registry::ModelRegistry;
    use crate::reporter::AppReporter;

    let app_reporter = AppReporter::from(bar);
    let registry = ModelRegistry::builtin()?;

    let mut frame_source = match DetectFrameSource::open(source, &app_reporter).await {
        Ok(frame_source) => frame_source,
        Err(err) => return Err(report_capture_failure(&app_reporter, err)),
    };
    app_reporter.report(format!(
        "Capture source ready: {}. Point it at the device model label.",
        frame_source.describe()
    ))?;

    app_reporter.status("Loading OCR engine...")?;
    let ocr_engine = match OcrsEngine::new(&options.ocr_options, &app_reporter) {
        Ok(ocr_engine) => ocr_engine,
        Err(err) => {
            tracing::error!("OCR engine initialization failed: {}", err);
            app_reporter.report(
                Style::new()
                    .red()
                    .apply_to("OCR engine failed to load, please check the OCR models directory.")
                    .to_string(),
            )?;
            return Err(err);
        }
    };
    app_reporter.report("OCR engine loaded.")?;

    let navigator = Navigators::new_navigator(options.open_browser, &app_reporter);
    let session = ScanSession::new(
        &registry,
        options.match_policy,
        &ocr_engine,
        &navigator,
        &app_reporter,
        options.redirect_delay,
    );

    let scan_result = session
        .run(&mut frame_source, options.interactive, || {
            let retry = bar.suspend(|| prompt_retry(term))?;
            bar.set_position(0);
            Ok(retry)
        })
        .await;
    match scan_result {
        Err(err) if err.is_capture_failure() => Err(report_capture_failure(&app_reporter, err)),
        scan_result => scan_result,
    }
}

#[cfg(feature = "ocr")]
fn report_capture_failure(
    app_reporter: &crate::reporter::AppReporter<'_>,
    err: crate::errors::AppError,
) -> crate::errors::AppError {
    tracing::error!("Unable to access capture source: {}", err);
    if let Err(report_err) = app_reporter.report(
        Style::new()
            .red()
            .apply_to("Unable to access capture source, please check permissions.")
            .to_string(),
    ) {
        tracing::warn!("Unable to report capture failure: {}", report_err);
    }
    err
}

#[cfg(not(feature = "ocr"))]
async fn scan_source(
    _term: &Term,
    _bar: &ProgressBar,
    _source: &str,
    _options: &ScanCommandOptions,
) -> AppResult<ScanCommandResult> {
    Err(crate::errors::AppError::OcrEngineError {
        message: "OCR support is not enabled in this build".to_string(),
    })
}

#[cfg(feature = "ocr")]
fn prompt_retry(term: &Term) -> AppResult<bool> {
    term.write_str("Press Enter to capture again or type q to quit: ")?;
    let answer = term.read_line()?;
    Ok(!answer.trim().eq_ignore_ascii_case("q"))
}
