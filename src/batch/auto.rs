use super::{BatchSummary, FileOutcome, Pipeline, is_video_file, list_files};
use crate::analyzer::probe_subtitle_tracks;
use crate::error::AppError;
use crate::tracks::{candidates, is_valid_code, match_track};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Split a comma-separated language list, dropping empty entries.
///
/// Codes end up in file names, so anything but ASCII letters, digits and `-` is rejected.
pub fn parse_languages(list: &str) -> Result<Vec<String>, AppError> {
    let languages: Vec<String> = list
        .split(',')
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty())
        .collect();
    if let Some(bad) = languages.iter().find(|l| !is_valid_code(l)) {
        return Err(AppError::Config(format!(
            "invalid language code '{}': use letters, digits and '-' only",
            bad
        )));
    }
    Ok(languages)
}

impl Pipeline<'_> {
    /// Discover, match, extract and merge the requested languages for every
    /// video file in `target_dir`
    pub fn run_auto(&self, target_dir: &Path, languages: &[String]) -> Result<BatchSummary, AppError> {
        if languages.len() < 2 {
            return Err(AppError::Config(format!(
                "auto mode needs at least two languages, got {}",
                languages.len()
            )));
        }

        let files = list_files(target_dir, is_video_file)?;
        info!("Auto mode for languages: {}", languages.join(","));
        self.run_files(files, |media, work_dir| {
            self.process_auto(media, languages, work_dir)
        })
    }

    fn process_auto(&self, media: &Path, languages: &[String], work_dir: &Path) -> FileOutcome {
        // discover
        let tracks = probe_subtitle_tracks(self.runner, media);
        if tracks.is_empty() {
            return FileOutcome::SkippedNoTracks;
        }
        for track in &tracks {
            debug!("  {}", track.display_name());
        }

        // match
        let mut matched: Vec<(&str, usize)> = Vec::with_capacity(languages.len());
        for language in languages {
            match match_track(&tracks, language) {
                Some(index) => {
                    debug!("Language '{}' -> stream {}", language, index);
                    matched.push((language.as_str(), index));
                }
                None => {
                    debug!(
                        "No track tagged {:?} in {}",
                        candidates(language),
                        media.display()
                    );
                    return FileOutcome::SkippedNoMatch {
                        language: language.clone(),
                    };
                }
            }
        }

        // extract
        let mut extracted: Vec<PathBuf> = Vec::with_capacity(matched.len());
        for (language, index) in matched {
            match self.extract_normalized(media, index, language, work_dir) {
                Ok(path) => extracted.push(path),
                Err(e) => {
                    warn!("{}", e);
                    return FileOutcome::SkippedExtractionFailed {
                        language: language.to_string(),
                        reason: e.to_string(),
                    };
                }
            }
        }

        // merge
        self.merge_extracted(media, &extracted)
    }
}
