mod analyzer;
mod batch;
mod config;
mod error;
mod extractor;
mod subtitle;
mod tracks;
mod utils;

use anyhow::{Context, Result};
use batch::{BatchSummary, Pipeline, auto::parse_languages, run_check};
use clap::Parser;
use config::{LegacyConfig, default_file_extensions};
use std::path::PathBuf;
use std::process::ExitCode;
use subtitle::TimelineMerger;
use tracing::{error, info, warn};
use utils::{DependencyStatus, SystemRunner, init_logging};

/// Merge two embedded subtitle tracks into one dual-language .srt per video
#[derive(Parser, Debug)]
#[command(name = "dualsub", version)]
struct Cli {
    /// Directory containing the media files
    #[arg(value_name = "TARGET_DIR", default_value = ".")]
    target_dir: PathBuf,

    /// Print ffprobe's report for one random matching file and exit
    #[arg(long, conflicts_with = "auto")]
    check: bool,

    /// Find tracks by language instead of dual_sub_conf.toml (e.g. zh,en)
    #[arg(long, value_name = "LANGS")]
    auto: Option<String>,

    /// Where merged subtitles are written (default: TARGET_DIR)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let runner = SystemRunner;
    let missing = DependencyStatus::check(&runner).missing();
    if !missing.is_empty() {
        warn!("Not found on PATH: {}", missing.join(", "));
    }

    if cli.check {
        // the config is optional here, but a broken one is still an error
        let extensions = LegacyConfig::load_optional(&cli.target_dir)?
            .map(|c| c.file_extensions)
            .unwrap_or_else(default_file_extensions);
        run_check(&runner, &cli.target_dir, &extensions)?;
        return Ok(());
    }

    let output_dir = cli.output_dir.clone().unwrap_or_else(|| cli.target_dir.clone());
    if !output_dir.is_dir() {
        anyhow::bail!("output directory {} does not exist", output_dir.display());
    }
    let pipeline = Pipeline::new(&runner, &TimelineMerger, output_dir);

    let summary = match cli.auto.as_deref() {
        Some(list) => {
            let languages = parse_languages(list)?;
            println!("processing {} for languages {}", cli.target_dir.display(), languages.join(","));
            pipeline.run_auto(&cli.target_dir, &languages)?
        }
        None => {
            let config = LegacyConfig::load(&cli.target_dir)
                .context("legacy mode needs a dual_sub_conf.toml in the target directory")?;
            println!("processing all media files in {}...", cli.target_dir.display());
            pipeline.run_legacy(&cli.target_dir, &config)?
        }
    };

    report(&summary);
    Ok(())
}

fn report(summary: &BatchSummary) {
    info!("Batch finished");
    println!("{}", summary.report());
}
