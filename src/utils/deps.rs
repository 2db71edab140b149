use super::process::CommandRunner;

/// Availability of the external tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyStatus {
    pub ffmpeg: bool,
    pub ffprobe: bool,
}

impl DependencyStatus {
    /// Check all dependencies
    pub fn check(runner: &dyn CommandRunner) -> Self {
        Self {
            ffmpeg: check_command(runner, "ffmpeg"),
            ffprobe: check_command(runner, "ffprobe"),
        }
    }

    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.ffmpeg {
            missing.push("ffmpeg");
        }
        if !self.ffprobe {
            missing.push("ffprobe");
        }
        missing
    }
}

/// Check if a command is available
fn check_command(runner: &dyn CommandRunner, cmd: &str) -> bool {
    runner
        .output(cmd, &["-version".to_string()])
        .is_ok_and(|o| o.success())
}
