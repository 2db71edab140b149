use super::outcome::FileOutcome;
use humansize::{DECIMAL, format_size};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Per-file outcomes of one batch run
#[derive(Debug)]
pub struct BatchSummary {
    pub outcomes: Vec<(PathBuf, FileOutcome)>,
    pub done_count: usize,
    pub skipped_count: usize,
    pub bytes_written: u64,
    pub start_time: Instant,
    pub end_time: Option<Instant>,
}

impl BatchSummary {
    pub fn new() -> Self {
        Self {
            outcomes: Vec::new(),
            done_count: 0,
            skipped_count: 0,
            bytes_written: 0,
            start_time: Instant::now(),
            end_time: None,
        }
    }

    pub fn record(&mut self, media: PathBuf, outcome: FileOutcome) {
        match &outcome {
            FileOutcome::Done { output } => {
                self.done_count += 1;
                self.bytes_written += std::fs::metadata(output).map(|m| m.len()).unwrap_or(0);
            }
            _ => self.skipped_count += 1,
        }
        self.outcomes.push((media, outcome));
    }

    pub fn finish(&mut self) {
        self.end_time = Some(Instant::now());
    }

    pub fn elapsed_time(&self) -> Duration {
        self.end_time
            .map(|end| end.duration_since(self.start_time))
            .unwrap_or_else(|| self.start_time.elapsed())
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn outcome_for(&self, file_name: &str) -> Option<&FileOutcome> {
        self.outcomes
            .iter()
            .find(|(path, _)| path.file_name().is_some_and(|n| n == file_name))
            .map(|(_, outcome)| outcome)
    }

    /// One-line report printed after the batch
    pub fn report(&self) -> String {
        format!(
            "processed {} file(s): {} done, {} skipped, {} written in {:.1}s",
            self.total(),
            self.done_count,
            self.skipped_count,
            format_size(self.bytes_written, DECIMAL),
            self.elapsed_time().as_secs_f64()
        )
    }
}

impl Default for BatchSummary {
    fn default() -> Self {
        Self::new()
    }
}
