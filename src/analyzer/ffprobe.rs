use crate::error::AppError;
use crate::tracks::SubtitleTrack;
use crate::utils::CommandRunner;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

const FFPROBE: &str = "ffprobe";

/// List the subtitle streams of a media file.
///
/// Any failure (ffprobe missing, non-zero exit, unparseable output) yields an
/// empty list so the caller skips the file instead of aborting the batch.
pub fn probe_subtitle_tracks(runner: &dyn CommandRunner, input_path: &Path) -> Vec<SubtitleTrack> {
    match try_probe(runner, input_path) {
        Ok(tracks) => {
            debug!(
                "Found {} subtitle track(s) in {}",
                tracks.len(),
                input_path.display()
            );
            tracks
        }
        Err(e) => {
            warn!("Probing {} failed: {}", input_path.display(), e);
            Vec::new()
        }
    }
}

fn try_probe(runner: &dyn CommandRunner, input_path: &Path) -> Result<Vec<SubtitleTrack>, AppError> {
    let args = [
        "-v".to_string(),
        "quiet".to_string(),
        "-print_format".to_string(),
        "json".to_string(),
        "-show_streams".to_string(),
        input_path.to_string_lossy().to_string(),
    ];

    let output = run_ffprobe(runner, &args)?;
    parse_subtitle_streams(&output)
}

/// Build subtitle tracks from ffprobe JSON output
pub fn parse_subtitle_streams(json: &str) -> Result<Vec<SubtitleTrack>, AppError> {
    let data: AllStreamsOutput = serde_json::from_str(json)
        .map_err(|e| AppError::Probe(format!("Failed to parse ffprobe output: {}", e)))?;

    let mut tracks: Vec<SubtitleTrack> = Vec::new();
    for stream in data.streams {
        if stream.codec_type.as_deref() != Some("subtitle") {
            continue;
        }
        let Some(index) = stream.index else {
            debug!("Ignoring subtitle stream without index");
            continue;
        };
        if tracks.iter().any(|t| t.index == index) {
            debug!("Ignoring duplicate stream index {}", index);
            continue;
        }
        let tags = stream.tags.unwrap_or_default();
        tracks.push(SubtitleTrack::new(
            index,
            tags.language.as_deref(),
            tags.title.as_deref(),
        ));
    }

    Ok(tracks)
}

/// Stream ffprobe's human-readable report for a file to the terminal
pub fn inspect(runner: &dyn CommandRunner, input_path: &Path) -> Result<bool, AppError> {
    let args = [
        "-hide_banner".to_string(),
        input_path.to_string_lossy().to_string(),
    ];
    let code = runner.stream(FFPROBE, &args).map_err(|e| AppError::Tool {
        tool: FFPROBE.to_string(),
        message: e.to_string(),
    })?;
    Ok(code == Some(0))
}

/// Run ffprobe with arguments
fn run_ffprobe(runner: &dyn CommandRunner, args: &[String]) -> Result<String, AppError> {
    let output = runner.output(FFPROBE, args).map_err(|e| AppError::Tool {
        tool: FFPROBE.to_string(),
        message: e.to_string(),
    })?;

    if !output.success() {
        return Err(AppError::Probe(format!(
            "ffprobe failed: {}",
            output.stderr_tail()
        )));
    }

    Ok(output.stdout_string())
}

// JSON deserialization structures

#[derive(Debug, Deserialize)]
struct AllStreamsOutput {
    #[serde(default)]
    streams: Vec<RawStream>,
}

#[derive(Debug, Deserialize)]
struct RawStream {
    index: Option<usize>,
    codec_type: Option<String>,
    tags: Option<StreamTags>,
}

#[derive(Debug, Default, Deserialize)]
struct StreamTags {
    language: Option<String>,
    title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::process::fake::{FakeRunner, failed, ok};

    const CHI_ENG: &str = r#"{
        "streams": [
            {"index": 0, "codec_name": "h264", "codec_type": "video"},
            {"index": 1, "codec_name": "subrip", "codec_type": "subtitle",
             "tags": {"language": "chi", "title": "Chinese"}},
            {"index": 2, "codec_name": "subrip", "codec_type": "subtitle",
             "tags": {"language": "eng"}}
        ]
    }"#;

    #[test]
    fn test_probe_returns_subtitle_streams_only() {
        let runner = FakeRunner::new().on("ffprobe", |_| ok(CHI_ENG));
        let tracks = probe_subtitle_tracks(&runner, Path::new("test_zh_en.mkv"));

        assert_eq!(
            tracks,
            vec![
                SubtitleTrack::new(1, Some("chi"), Some("Chinese")),
                SubtitleTrack::new(2, Some("eng"), None),
            ]
        );

        let calls = runner.calls_to("ffprobe");
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            vec!["-v", "quiet", "-print_format", "json", "-show_streams", "test_zh_en.mkv"]
        );
    }

    #[test]
    fn test_probe_no_subtitles() {
        let json = r#"{"streams": [{"index": 0, "codec_type": "video"}]}"#;
        let runner = FakeRunner::new().on("ffprobe", move |_| ok(json));
        assert!(probe_subtitle_tracks(&runner, Path::new("test_nosubs.mp4")).is_empty());
    }

    #[test]
    fn test_probe_failures_yield_no_tracks() {
        let missing_tool = FakeRunner::new();
        assert!(probe_subtitle_tracks(&missing_tool, Path::new("a.mkv")).is_empty());

        let bad_exit = FakeRunner::new()
            .on("ffprobe", |_| failed(1, "non_existent_file.mkv: No such file or directory"));
        assert!(probe_subtitle_tracks(&bad_exit, Path::new("non_existent_file.mkv")).is_empty());

        let garbage = FakeRunner::new().on("ffprobe", |_| ok("not json"));
        assert!(probe_subtitle_tracks(&garbage, Path::new("a.mkv")).is_empty());
    }

    #[test]
    fn test_parse_missing_tags_and_streams() {
        let tracks = parse_subtitle_streams(r#"{"streams": [{"index": 4, "codec_type": "subtitle"}]}"#)
            .unwrap();
        assert_eq!(tracks[0].language, "unknown");

        assert!(parse_subtitle_streams("{}").unwrap().is_empty());
    }

    #[test]
    fn test_inspect_streams_report() {
        let runner = FakeRunner::new().on("ffprobe", |_| ok(""));
        assert!(inspect(&runner, Path::new("movie.mkv")).unwrap());
        assert_eq!(runner.calls_to("ffprobe")[0], vec!["-hide_banner", "movie.mkv"]);

        let missing = FakeRunner::new();
        assert!(matches!(
            inspect(&missing, Path::new("movie.mkv")),
            Err(AppError::Tool { .. })
        ));
    }
}
