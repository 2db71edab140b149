use super::srt::SubtitleFile;
use crate::error::AppError;
use std::path::Path;
use tracing::debug;

/// Collapse line breaks and tabs into single spaces and trim
pub fn normalize_text(text: &str) -> String {
    text.split(['\n', '\r', '\t', ' '])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize every cue's text; indices, timings and order are untouched
pub fn normalize_cues(file: &mut SubtitleFile) {
    for cue in &mut file.cues {
        cue.text = normalize_text(&cue.text);
    }
}

/// Rewrite a .srt file in place with one-line cues.
///
/// A parse failure returns before anything is written, so the file stays as it was.
pub fn normalize_file(path: &Path) -> Result<(), AppError> {
    let mut file = SubtitleFile::read(path)?;
    normalize_cues(&mut file);
    file.write(path)?;
    debug!("Normalized {} cue(s) in {}", file.len(), path.display());
    Ok(())
}
