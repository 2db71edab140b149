pub mod auto;
pub mod legacy;
pub mod outcome;
pub mod summary;

pub use legacy::run_check;
pub use outcome::FileOutcome;
pub use summary::BatchSummary;

use crate::error::AppError;
use crate::extractor::{ExtractionRequest, extract_track, media_stem};
use crate::subtitle::{SubtitleMerger, normalize_file};
use crate::utils::CommandRunner;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Container extensions considered in auto mode
const VIDEO_EXTENSIONS: [&str; 9] = [
    "mp4", "mkv", "avi", "mov", "webm", "m4v", "ts", "wmv", "flv",
];

/// Shared collaborators of both batch modes
pub struct Pipeline<'a> {
    pub runner: &'a dyn CommandRunner,
    pub merger: &'a dyn SubtitleMerger,
    /// Where `<stem>.srt` files are written
    pub output_dir: PathBuf,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        merger: &'a dyn SubtitleMerger,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            merger,
            output_dir: output_dir.into(),
        }
    }

    /// Merged subtitle path for a media file
    pub fn output_path(&self, media: &Path) -> PathBuf {
        self.output_dir.join(format!("{}.srt", media_stem(media)))
    }

    /// Process files one at a time. The work directory lives exactly as long as the batch.
    ///
    /// Each file extracts into its own subdirectory. A file whose output name was
    /// already written earlier in the batch is skipped.
    fn run_files(
        &self,
        files: Vec<PathBuf>,
        mut process: impl FnMut(&Path, &Path) -> FileOutcome,
    ) -> Result<BatchSummary, AppError> {
        let work_dir = create_work_dir()?;
        info!("Files to process: {}", files.len());

        let mut written: HashMap<PathBuf, PathBuf> = HashMap::new();
        let mut summary = BatchSummary::new();
        for (n, media) in files.into_iter().enumerate() {
            info!("Processing: {}", media.display());
            let output = self.output_path(&media);
            let outcome = match written.get(&output) {
                Some(previous) => FileOutcome::SkippedMergeError {
                    reason: format!(
                        "{} was already written for {}",
                        output.display(),
                        previous.display()
                    ),
                },
                None => {
                    let file_dir = work_dir.path().join(n.to_string());
                    std::fs::create_dir(&file_dir)?;
                    process(&media, &file_dir)
                }
            };
            if outcome.is_done() {
                written.insert(output, media.clone());
            }
            println!("{}", outcome.status_line(&media));
            summary.record(media, outcome);
        }
        summary.finish();

        debug!("Removing work directory {}", work_dir.path().display());
        Ok(summary)
    }

    /// Extract one stream into the work directory and normalize it in place
    fn extract_normalized(
        &self,
        media: &Path,
        track_index: usize,
        language: &str,
        work_dir: &Path,
    ) -> Result<PathBuf, AppError> {
        let request = ExtractionRequest::new(media, track_index, language, work_dir);
        let path = extract_track(self.runner, &request)?;
        normalize_file(&path)?;
        Ok(path)
    }

    /// Merge extracted files into `<output_dir>/<stem>.srt`
    fn merge_extracted(&self, media: &Path, extracted: &[PathBuf]) -> FileOutcome {
        if let Some(missing) = extracted.iter().find(|p| !p.is_file()) {
            return FileOutcome::SkippedMergeError {
                reason: format!("{} is missing", missing.display()),
            };
        }

        let output = self.output_path(media);
        if extracted.len() == 2 {
            debug!("Dual-line merge into {}", output.display());
        } else {
            debug!("Merging {} files into {}", extracted.len(), output.display());
        }

        match self.merger.merge(extracted, &output) {
            Ok(()) => FileOutcome::Done { output },
            Err(e) => {
                warn!("Merge failed for {}: {}", media.display(), e);
                FileOutcome::SkippedMergeError {
                    reason: e.to_string(),
                }
            }
        }
    }
}

fn create_work_dir() -> Result<TempDir, AppError> {
    let dir = tempfile::Builder::new().prefix("dualsub-").tempdir()?;
    debug!("Work directory: {}", dir.path().display());
    Ok(dir)
}

/// Check if a path is a video file
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| VIDEO_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Regular files directly inside `dir` accepted by `accept`, sorted by name
pub fn list_files(dir: &Path, accept: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>, AppError> {
    if !dir.is_dir() {
        return Err(AppError::Config(format!(
            "target directory {} does not exist",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        match entry {
            Ok(entry) if entry.path().is_file() && accept(entry.path()) => {
                files.push(entry.into_path());
            }
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable entry: {}", e),
        }
    }
    Ok(files)
}
