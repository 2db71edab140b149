use super::SubtitleTrack;

/// Short language code -> tag spellings seen in container metadata
static LANGUAGE_ALIASES: &[(&str, &[&str])] = &[
    ("zh", &["chi", "zho", "zh", "cmn", "chn"]),
    ("en", &["eng", "en"]),
    ("ja", &["jpn", "ja"]),
    ("ko", &["kor", "ko"]),
    ("fr", &["fre", "fra", "fr"]),
    ("de", &["ger", "deu", "de"]),
    ("es", &["spa", "es"]),
    ("it", &["ita", "it"]),
    ("pt", &["por", "pt"]),
    ("ru", &["rus", "ru"]),
];

/// Whether `code` is safe to use as a file name component: ASCII letters, digits and `-`
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty() && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Tags accepted for a requested code. Unknown codes only match themselves.
pub fn candidates(code: &str) -> Vec<String> {
    let code = code.trim().to_lowercase();
    LANGUAGE_ALIASES
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, tags)| tags.iter().map(|t| t.to_string()).collect())
        .unwrap_or_else(|| vec![code])
}

/// Index of the first discovered track whose language is a candidate for `code`
pub fn match_track(tracks: &[SubtitleTrack], code: &str) -> Option<usize> {
    let candidates = candidates(code);
    tracks
        .iter()
        .find(|track| {
            let language = track.language.to_lowercase();
            candidates.iter().any(|c| *c == language)
        })
        .map(|track| track.index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(index: usize, language: &str) -> SubtitleTrack {
        SubtitleTrack::new(index, Some(language), None)
    }

    #[test]
    fn test_match_track() {
        let tracks = vec![track(0, "chi"), track(1, "eng"), track(2, "jpn")];

        assert_eq!(match_track(&tracks, "zh"), Some(0));
        assert_eq!(match_track(&tracks, "en"), Some(1));
        assert_eq!(match_track(&tracks, "ja"), Some(2));
        assert_eq!(match_track(&tracks, "fr"), None);
    }

    #[test]
    fn test_every_alias_tag_resolves() {
        for (code, tags) in LANGUAGE_ALIASES {
            for tag in tags.iter() {
                let tracks = vec![track(0, "und"), track(7, tag)];
                assert_eq!(match_track(&tracks, code), Some(7), "{} -> {}", code, tag);
            }
        }
    }

    #[test]
    fn test_unknown_code_matches_exactly() {
        let tracks = vec![track(2, "nld"), track(3, "swe")];
        assert_eq!(match_track(&tracks, "SWE"), Some(3));
        assert_eq!(match_track(&tracks, "nl"), None);
        assert_eq!(candidates("xx"), vec!["xx".to_string()]);
    }

    #[test]
    fn test_first_discovered_track_wins() {
        // "zho" is later in the alias list than "chi" but discovered first
        let tracks = vec![track(4, "zho"), track(5, "chi")];
        assert_eq!(match_track(&tracks, "zh"), Some(4));
    }

    #[test]
    fn test_valid_codes() {
        assert!(is_valid_code("zh"));
        assert!(is_valid_code("pt-BR"));
        for bad in ["", "../x", "a/b", "e n", "zh."] {
            assert!(!is_valid_code(bad), "{:?}", bad);
        }
    }

    #[test]
    fn test_unknown_language_never_matches_alias() {
        let tracks = vec![SubtitleTrack::new(1, None, None)];
        assert_eq!(match_track(&tracks, "en"), None);
    }
}
