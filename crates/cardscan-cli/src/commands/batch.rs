//! Batch processing command for multiple card files.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Local};
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use cardscan_core::{CardscanConfig, ExtractionResult};

use super::extract::{extract_file, render, OutputFormat, IMAGE_EXTENSIONS};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// OCR engine confidence (0 - 100) for inputs that carry none
    #[arg(long)]
    ocr_confidence: Option<f32>,

    /// Drop fields scored below this confidence (0 - 1)
    #[arg(long)]
    min_confidence: Option<f32>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Outcome of one card.
struct CardOutcome {
    path: PathBuf,
    result: Result<ExtractionResult, String>,
    processing_time_ms: u64,
    finished_at: DateTime<Local>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = Arc::new(super::load_config(config_path)?);

    let files = collect_inputs(&args.input, &config)?;
    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut handles = Vec::with_capacity(files.len());

    for path in files {
        let semaphore = Arc::clone(&semaphore);
        let config = Arc::clone(&config);
        let progress = progress.clone();
        let ocr_confidence = args.ocr_confidence;

        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let file_start = Instant::now();

            let task_path = path.clone();
            let result =
                tokio::task::spawn_blocking(move || extract_file(&task_path, ocr_confidence, &config))
                    .await?
                    .map_err(|e| e.to_string());

            progress.inc(1);
            anyhow::Ok(CardOutcome {
                path,
                result,
                processing_time_ms: file_start.elapsed().as_millis() as u64,
                finished_at: Local::now(),
            })
        }));
    }

    // Awaiting in spawn order keeps outcomes in input order.
    let mut outcomes = Vec::with_capacity(handles.len());
    let mut pending = handles.into_iter();
    while let Some(handle) = pending.next() {
        let outcome = handle.await??;

        if let Err(message) = &outcome.result {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", outcome.path.display(), message);
            } else {
                error!("Failed to process {}: {}", outcome.path.display(), message);
                pending.for_each(|h| h.abort());
                progress.abandon();
                anyhow::bail!("Processing failed: {}", message);
            }
        }

        outcomes.push(outcome);
    }

    progress.finish_with_message("Complete");

    let min_confidence = args
        .min_confidence
        .unwrap_or(config.extraction.min_field_confidence);

    if let Some(output_dir) = &args.output_dir {
        for outcome in &outcomes {
            let Ok(result) = &outcome.result else {
                continue;
            };

            let output_name = outcome
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("card");
            let output_path = output_dir.join(format!("{}.{}", output_name, args.format.extension()));

            fs::write(&output_path, render(result, args.format, min_confidence, &config)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &outcomes, min_confidence)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = outcomes.iter().filter(|o| o.result.is_err()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        outcomes.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(outcomes.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for outcome in &failed {
            if let Err(message) = &outcome.result {
                println!("  - {}: {}", outcome.path.display(), message);
            }
        }
    }

    Ok(())
}

/// Expand the glob into card inputs, skipping recognition sidecars.
fn collect_inputs(pattern: &str, config: &CardscanConfig) -> anyhow::Result<Vec<PathBuf>> {
    let sidecar_suffix = format!(
        ".{}",
        config.recognition.sidecar_suffix.trim_start_matches('.')
    );

    let files = glob(pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .filter(|p| {
            let name = p.file_name().and_then(|n| n.to_str()).unwrap_or("");
            !name.ends_with(&sidecar_suffix)
        })
        .filter(|p| {
            let ext = p
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_lowercase();
            ext == "txt" || ext == "json" || IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .collect::<Vec<_>>();

    // A `.txt` beside an image is that image's recognized text, not a card.
    let image_texts: HashSet<PathBuf> = files
        .iter()
        .filter(|p| is_image(p))
        .map(|p| p.with_extension("txt"))
        .collect();

    Ok(files
        .into_iter()
        .filter(|p| !image_texts.contains(p))
        .collect())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
}

fn write_summary(path: &Path, outcomes: &[CardOutcome], min_confidence: f32) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "full_name",
        "company",
        "email",
        "phone",
        "confidence",
        "processing_time_ms",
        "processed_at",
        "error",
    ])?;

    for outcome in outcomes {
        let filename = outcome
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let elapsed = outcome.processing_time_ms.to_string();
        let finished_at = outcome.finished_at.to_rfc3339();

        match &outcome.result {
            Ok(result) => {
                let contact = result.contact(min_confidence);
                let confidence = contact.confidence.to_string();
                wtr.write_record([
                    filename,
                    "success",
                    contact.full_name.as_deref().unwrap_or_default(),
                    contact.company.as_deref().unwrap_or_default(),
                    contact.email.as_deref().unwrap_or_default(),
                    contact.phone.as_deref().unwrap_or_default(),
                    confidence.as_str(),
                    elapsed.as_str(),
                    finished_at.as_str(),
                    "",
                ])?;
            }
            Err(message) => {
                wtr.write_record([
                    filename,
                    "error",
                    "",
                    "",
                    "",
                    "",
                    "",
                    elapsed.as_str(),
                    finished_at.as_str(),
                    message.as_str(),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_inputs_skips_sidecars() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.txt", "b.png", "b.png.ocr.json", "b.txt", "c.json", "notes.md"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }

        let pattern = format!("{}/*", dir.path().display());
        let mut names: Vec<String> = collect_inputs(&pattern, &CardscanConfig::default())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();

        assert_eq!(names, vec!["a.txt", "b.png", "c.json"]);
    }
}
