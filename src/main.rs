use clap::Parser;
use console::{Style, Term};
use rvstruct::ValueStruct;

use std::error::Error;

mod args;
use crate::commands::*;
use crate::errors::AppError;
use args::*;

mod reporter;

mod capture;

mod errors;

mod commands;

mod matching;

mod navigation;

mod ocr;

mod registry;

pub type AppResult<T> = Result<T, AppError>;

mod common_types;

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let term = Term::stdout();
    let bold_style = Style::new().bold();

    let cli = CliArgs::parse();
    if !matches!(
        cli.command,
        CliCommand::Match { json: true, .. } | CliCommand::Models { json: true }
    ) {
        term.write_line(
            format!(
                "{} v{}",
                bold_style.clone().green().apply_to("ModelScan"),
                bold_style.apply_to(env!("CARGO_PKG_VERSION"))
            )
            .as_str(),
        )?;
    }

    if let Err(err) = handle_args(cli, &term).await {
        tracing::error!("{}", err);
        term.write_line(
            format!(
                "{}: {}\nDetails: {:?}",
                bold_style.clone().red().apply_to("Error"),
                err,
                err.source()
            )
            .as_str(),
        )?;
    }

    Ok(())
}

async fn handle_args(cli: CliArgs, term: &Term) -> AppResult<()> {
    let bold_style = Style::new().bold();

    match cli.command {
        CliCommand::Scan { source, scan_args } => {
            let scan_result = command_scan(term, &source, scan_args.into()).await?;
            let summary = match &scan_result.outcome {
                ScanOutcome::Redirected(model_match) => format!(
                    "{} -> {}",
                    bold_style
                        .clone()
                        .green()
                        .apply_to(model_match.model_id.value()),
                    model_match.url
                ),
                ScanOutcome::NoMatch { .. } => Style::new()
                    .yellow()
                    .apply_to("No device model matched.")
                    .to_string(),
                ScanOutcome::RecognitionFailed { message } => format!(
                    "{}: {}",
                    Style::new().red().apply_to("Recognition failed"),
                    message
                ),
            };
            term.write_line(
                format!(
                    "{}\n{} attempts made.",
                    summary,
                    bold_style.apply_to(scan_result.attempts)
                )
                .as_str(),
            )?;
        }
        CliCommand::Match {
            text,
            match_policy,
            json,
        } => {
            command_match(
                term,
                &text.join(" "),
                MatchCommandOptions {
                    match_policy,
                    json_output: json,
                },
            )?;
        }
        CliCommand::Models { json } => {
            command_models(term, ModelsCommandOptions { json_output: json })?;
        }
    }

    Ok(())
}
