//! Extract command - pull the contact out of a single card.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use cardscan_core::{
    CardScanner, CardscanConfig, Contact, ExtractionPipeline, ExtractionResult, FieldScores,
    RawOcrOutput, SidecarRecognizer,
};

/// Image formats scanned through a recognition sidecar.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "tiff", "tif", "bmp"];

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input: OCR text (.txt), OCR output (.json), an image with a
    /// recognition sidecar, or - for text on stdin
    #[arg(required = true)]
    input: PathBuf,

    /// OCR engine confidence (0 - 100) for inputs that carry none
    #[arg(long)]
    ocr_confidence: Option<f32>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Drop fields scored below this confidence (0 - 1)
    #[arg(long)]
    min_confidence: Option<f32>,

    /// Print per-field confidence scores to stderr
    #[arg(long)]
    show_confidence: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Contact plus field scores, as written by `--format json`.
#[derive(Serialize)]
struct ContactReport {
    #[serde(flatten)]
    contact: Contact,
    scores: FieldScores,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let result = if args.input.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        let confidence = args
            .ocr_confidence
            .unwrap_or(config.recognition.default_confidence);
        ExtractionPipeline::new().run(&text, confidence)?
    } else {
        if !args.input.exists() {
            anyhow::bail!("Input file not found: {}", args.input.display());
        }
        extract_file(&args.input, args.ocr_confidence, &config)?
    };

    let min_confidence = args
        .min_confidence
        .unwrap_or(config.extraction.min_field_confidence);
    let output = render(&result, args.format, min_confidence, &config)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    if args.show_confidence {
        eprintln!();
        for (name, field) in result.fields() {
            eprintln!("{} {:<10} {:.2}", style("ℹ").blue(), name, field.confidence());
        }
        eprintln!(
            "{} Overall confidence: {}%",
            style("ℹ").blue(),
            result.confidence
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Extract the contact from one input file, dispatching on its extension.
pub fn extract_file(
    path: &Path,
    ocr_confidence: Option<f32>,
    config: &CardscanConfig,
) -> anyhow::Result<ExtractionResult> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    let default_confidence = ocr_confidence.unwrap_or(config.recognition.default_confidence);

    info!("Processing file: {}", path.display());

    match extension.as_str() {
        "txt" => {
            let raw = fs::read(path)?;
            Ok(ExtractionPipeline::new().run_bytes(&raw, default_confidence)?)
        }
        "json" => {
            let mut output: RawOcrOutput = serde_json::from_str(&fs::read_to_string(path)?)?;
            if let Some(confidence) = ocr_confidence {
                output.confidence = confidence;
            }
            Ok(ExtractionPipeline::new().run(&output.text, output.confidence)?)
        }
        ext if IMAGE_EXTENSIONS.contains(&ext) => {
            let recognizer = SidecarRecognizer::from_config(&config.recognition)
                .with_default_confidence(default_confidence);
            Ok(CardScanner::from_config(config).scan(recognizer, path)?)
        }
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

/// Format an extraction result for output.
pub fn render(
    result: &ExtractionResult,
    format: OutputFormat,
    min_confidence: f32,
    config: &CardscanConfig,
) -> anyhow::Result<String> {
    let mut contact = result.contact(min_confidence);
    if !config.extraction.keep_raw_text {
        contact.raw_text.clear();
    }

    match format {
        OutputFormat::Json => {
            let report = ContactReport {
                contact,
                scores: result.field_scores(),
            };
            Ok(serde_json::to_string_pretty(&report)? + "\n")
        }
        OutputFormat::Csv => format_csv(&contact),
        OutputFormat::Text => Ok(format_text(&contact)),
    }
}

fn format_csv(contact: &Contact) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "full_name",
        "position",
        "company",
        "email",
        "phone",
        "website",
        "address",
        "confidence",
    ])?;

    let confidence = contact.confidence.to_string();
    wtr.write_record([
        contact.full_name.as_deref().unwrap_or_default(),
        contact.position.as_deref().unwrap_or_default(),
        contact.company.as_deref().unwrap_or_default(),
        contact.email.as_deref().unwrap_or_default(),
        contact.phone.as_deref().unwrap_or_default(),
        contact.website.as_deref().unwrap_or_default(),
        contact.address.as_deref().unwrap_or_default(),
        confidence.as_str(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(contact: &Contact) -> String {
    let rows = [
        ("Name", &contact.full_name),
        ("Position", &contact.position),
        ("Company", &contact.company),
        ("Email", &contact.email),
        ("Phone", &contact.phone),
        ("Website", &contact.website),
        ("Address", &contact.address),
    ];

    let mut output = String::new();
    for (label, value) in rows {
        if let Some(value) = value {
            output.push_str(&format!("{:<9} {}\n", format!("{label}:"), value));
        }
    }
    output.push_str(&format!("\nConfidence: {}%\n", contact.confidence));

    output
}
