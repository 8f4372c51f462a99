pub mod config;
pub mod models;
pub mod output;
pub mod pipeline;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use models::ReportRecord;
use output::OutputError;
use pipeline::diagnostic;
use pipeline::extraction::{source_for_path, ExtractionError};
use pipeline::processor::ReportExtractor;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Extractor setup failed: {0}")]
    Setup(#[from] ExtractionError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// How a run ended. Only `Completed` writes a results file.
#[derive(Debug)]
pub enum RunOutcome {
    MissingInput(PathBuf),
    NoText(PathBuf),
    Completed {
        output: PathBuf,
        records: Vec<ReportRecord>,
        failures: usize,
    },
}

/// Read `input`, extract every report and write the results to `output`.
pub fn process_file(input: &Path, output: &Path, dump_dir: Option<&Path>) -> Result<RunOutcome, RunError> {
    if !input.exists() {
        tracing::warn!(path = %input.display(), "Input document not found");
        return Ok(RunOutcome::MissingInput(input.to_path_buf()));
    }

    let text = source_for_path(input).extract_text(input);
    if text.trim().is_empty() {
        tracing::warn!(path = %input.display(), "No text extracted");
        return Ok(RunOutcome::NoText(input.to_path_buf()));
    }
    tracing::info!(path = %input.display(), chars = text.chars().count(), "Document loaded");

    let extractor = ReportExtractor::with_recognizer(None)?;
    let outcome = extractor.process_document(&text);

    if let Some(dir) = dump_dir {
        diagnostic::dump_document(dir, &text, &outcome);
    }

    output::write_results(output, &outcome.records)?;

    Ok(RunOutcome::Completed {
        output: output.to_path_buf(),
        failures: outcome.failures.len(),
        records: outcome.records,
    })
}

pub fn run() -> Result<(), RunError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let input = config::input_path();
    let output = config::output_path();
    let dump_dir = diagnostic::dump_dir();

    match process_file(&input, &output, dump_dir.as_deref())? {
        RunOutcome::MissingInput(path) => {
            println!("Input file not found: {}", path.display());
            println!(
                "Place the document in the working directory or set {} to its path.",
                config::INPUT_ENV
            );
            println!("\nSample output format:");
            println!("{}", output::results_json(&output::sample_output())?);
        }
        RunOutcome::NoText(path) => {
            println!("No text extracted from {}", path.display());
        }
        RunOutcome::Completed {
            output: path,
            records,
            failures,
        } => {
            println!("Processed {} reports", records.len());
            if failures > 0 {
                println!("Skipped {failures} reports that failed extraction");
            }
            println!("Results saved to {}\n", path.display());
            for record in &records {
                print!("{}", output::format_summary(record));
            }
        }
    }

    Ok(())
}
