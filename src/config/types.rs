use serde::Deserialize;

/// One fixed subtitle stream of the legacy configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubTrackConfig {
    /// Container-global stream index, as passed to `-map 0:<n>`
    pub track_num: usize,
    /// Language tag used to name the extracted file
    pub lang_code: String,
}

/// Extensions processed when the configuration lists none
pub fn default_file_extensions() -> Vec<String> {
    vec!["mkv".to_string()]
}

/// File layout as written by users; validated into `LegacyConfig`
#[derive(Debug, Default, Deserialize)]
pub(super) struct RawLegacyConfig {
    pub first_line_sub: Option<SubTrackConfig>,
    #[serde(alias = "sencond_line_sub")]
    pub second_line_sub: Option<SubTrackConfig>,
    pub file_extensions: Option<Vec<String>>,
}
