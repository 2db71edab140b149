use std::fmt;
use std::path::{Path, PathBuf};

/// Terminal state of one media file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Merged subtitle written
    Done { output: PathBuf },
    /// Probe found no subtitle streams (or failed)
    SkippedNoTracks,
    /// A requested language has no matching track
    SkippedNoMatch { language: String },
    /// Extraction or normalization of one track failed
    SkippedExtractionFailed { language: String, reason: String },
    /// The merge call raised
    SkippedMergeError { reason: String },
}

impl FileOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, FileOutcome::Done { .. })
    }

    /// Line printed for the file once it is processed
    pub fn status_line(&self, media: &Path) -> String {
        match self {
            FileOutcome::Done { output } => format!("done {}", output.display()),
            _ => {
                let name = media
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| media.display().to_string());
                format!("skipped {}: {}", name, self)
            }
        }
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOutcome::Done { output } => write!(f, "done {}", output.display()),
            FileOutcome::SkippedNoTracks => write!(f, "no subtitle tracks"),
            FileOutcome::SkippedNoMatch { language } => {
                write!(f, "could not find track for language '{}'", language)
            }
            FileOutcome::SkippedExtractionFailed { language, reason } => {
                write!(f, "extraction failed for '{}': {}", language, reason)
            }
            FileOutcome::SkippedMergeError { reason } => write!(f, "merge error: {}", reason),
        }
    }
}
