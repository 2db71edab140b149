use super::command_builder::{ExtractionRequest, build_ffmpeg_args};
use crate::error::AppError;
use crate::utils::CommandRunner;
use std::path::PathBuf;
use tracing::{debug, info};

const FFMPEG: &str = "ffmpeg";

/// Demux one subtitle stream into `<stem>.<lang>.srt`, overwriting any existing file
pub fn extract_track(
    runner: &dyn CommandRunner,
    request: &ExtractionRequest,
) -> Result<PathBuf, AppError> {
    let output_path = request.output_path();
    let fail = |message: String| AppError::Extraction {
        source_path: request.source.clone(),
        index: request.track_index,
        message,
    };

    if !request.source.is_file() {
        return Err(fail("source file is not readable".to_string()));
    }

    info!(
        "Extracting stream {} ({}) from {}",
        request.track_index,
        request.language,
        request.source.display()
    );

    // a leftover file must not pass for this run's output
    if output_path.exists() {
        std::fs::remove_file(&output_path)
            .map_err(|e| fail(format!("Failed to remove stale {}: {}", output_path.display(), e)))?;
    }

    let args = build_ffmpeg_args(request);
    let output = runner
        .output(FFMPEG, &args)
        .map_err(|e| fail(format!("Failed to start ffmpeg: {}", e)))?;

    if !output.success() {
        return Err(fail(output.stderr_tail()));
    }

    if !output_path.is_file() {
        return Err(fail(format!(
            "ffmpeg exited cleanly but {} is missing",
            output_path.display()
        )));
    }

    debug!("Wrote {}", output_path.display());
    Ok(output_path)
}
