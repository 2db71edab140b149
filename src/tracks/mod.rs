pub mod language;

pub use language::{candidates, is_valid_code, match_track};

/// Language tag used when the container carries none
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Subtitle stream found in a media container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleTrack {
    /// Container-global stream index (what `-map 0:<index>` expects)
    pub index: usize,
    /// Lower-cased language tag, or "unknown"
    pub language: String,
    pub title: String,
}

impl SubtitleTrack {
    pub fn new(index: usize, language: Option<&str>, title: Option<&str>) -> Self {
        let language = language
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string());
        Self {
            index,
            language,
            title: title.unwrap_or_default().to_string(),
        }
    }

    pub fn display_name(&self) -> String {
        if self.title.is_empty() {
            format!("{}: {}", self.index, self.language)
        } else {
            format!("{}: {} - {}", self.index, self.language, self.title)
        }
    }
}
