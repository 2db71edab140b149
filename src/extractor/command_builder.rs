use std::path::{Path, PathBuf};

/// One subtitle stream to pull out of a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub source: PathBuf,
    /// Container-global stream index
    pub track_index: usize,
    /// Only used to name the output file
    pub language: String,
    pub destination_dir: PathBuf,
}

impl ExtractionRequest {
    pub fn new(
        source: &Path,
        track_index: usize,
        language: &str,
        destination_dir: &Path,
    ) -> Self {
        Self {
            source: source.to_path_buf(),
            track_index,
            language: language.to_string(),
            destination_dir: destination_dir.to_path_buf(),
        }
    }

    /// `<destination>/<media stem>.<lang>.srt`
    pub fn output_path(&self) -> PathBuf {
        self.destination_dir
            .join(format!("{}.{}.srt", media_stem(&self.source), self.language))
    }
}

/// File name without its last extension
pub fn media_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string())
}

/// Build FFmpeg arguments for demuxing one stream to SubRip
pub fn build_ffmpeg_args(request: &ExtractionRequest) -> Vec<String> {
    vec![
        "-nostdin".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-i".to_string(),
        request.source.to_string_lossy().to_string(),
        "-map".to_string(),
        format!("0:{}", request.track_index),
        "-c:s".to_string(),
        "srt".to_string(),
        "-y".to_string(),
        request.output_path().to_string_lossy().to_string(),
    ]
}
