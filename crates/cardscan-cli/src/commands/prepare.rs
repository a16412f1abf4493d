//! Prepare command - run image preprocessing only.

use std::path::PathBuf;

use clap::Args;
use console::style;
use indicatif::ProgressBar;

use cardscan_core::{prepared_path, ImagePreprocessor};

/// Arguments for the prepare command.
#[derive(Args)]
pub struct PrepareArgs {
    /// Card image
    #[arg(required = true)]
    input: PathBuf,

    /// Output image (default: <stem>_prep.png next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Target width in pixels (overrides configuration)
    #[arg(long)]
    width: Option<u32>,
}

pub async fn run(args: PrepareArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let mut preprocessor = ImagePreprocessor::from_config(&config.preprocessing);
    if let Some(width) = args.width {
        preprocessor = preprocessor.with_target_width(width);
    }

    let output = args.output.unwrap_or_else(|| prepared_path(&args.input));

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Preprocessing {}...", args.input.display()));

    let input = args.input.clone();
    let target = output.clone();
    let prepared =
        tokio::task::spawn_blocking(move || preprocessor.prepare_to(&input, &target)).await?;

    spinner.finish_and_clear();
    prepared?;

    println!(
        "{} Prepared image written to {}",
        style("✓").green(),
        output.display()
    );

    Ok(())
}
