use super::{BatchSummary, FileOutcome, Pipeline, list_files};
use crate::analyzer::inspect;
use crate::config::{LegacyConfig, extension_allowed};
use crate::error::AppError;
use crate::utils::CommandRunner;
use rand::seq::IndexedRandom;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

impl Pipeline<'_> {
    /// Extract the two configured streams of every allow-listed file and merge them.
    ///
    /// Track numbers are container-global stream indices; no probing or matching
    /// happens here.
    pub fn run_legacy(&self, target_dir: &Path, config: &LegacyConfig) -> Result<BatchSummary, AppError> {
        let files = list_files(target_dir, |p| config.accepts(p))?;
        info!(
            "Legacy mode: stream {} ({}) over stream {} ({})",
            config.first_line_sub.track_num,
            config.first_line_sub.lang_code,
            config.second_line_sub.track_num,
            config.second_line_sub.lang_code
        );
        self.run_files(files, |media, work_dir| {
            self.process_legacy(media, config, work_dir)
        })
    }

    fn process_legacy(&self, media: &Path, config: &LegacyConfig, work_dir: &Path) -> FileOutcome {
        let mut extracted = Vec::with_capacity(2);
        let mut first_failure: Option<(String, String)> = None;

        // both tracks are attempted even if the first one fails
        for sub in [&config.first_line_sub, &config.second_line_sub] {
            match self.extract_normalized(media, sub.track_num, &sub.lang_code, work_dir) {
                Ok(path) => extracted.push(path),
                Err(e) => {
                    warn!("{}", e);
                    first_failure.get_or_insert((sub.lang_code.clone(), e.to_string()));
                }
            }
        }

        if let Some((language, reason)) = first_failure {
            return FileOutcome::SkippedExtractionFailed { language, reason };
        }
        self.merge_extracted(media, &extracted)
    }
}

/// Show ffprobe's report for one random allow-listed file.
///
/// Returns the inspected file, or `None` when the directory has no candidate.
pub fn run_check(
    runner: &dyn CommandRunner,
    target_dir: &Path,
    extensions: &[String],
) -> Result<Option<PathBuf>, AppError> {
    let files = list_files(target_dir, |p| extension_allowed(p, extensions))?;
    let Some(file) = files.choose(&mut rand::rng()).cloned() else {
        println!(
            "no files with extension {} in {}",
            extensions.join("/"),
            target_dir.display()
        );
        return Ok(None);
    };

    println!("checking {}", file.display());
    if !inspect(runner, &file)? {
        // ffprobe prints its own diagnostics
        warn!("ffprobe reported an error for {}", file.display());
    }
    Ok(Some(file))
}
