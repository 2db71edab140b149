//! SubRip (.srt) reading and writing.
//!
//! ```text
//! 1
//! 00:00:01,000 --> 00:00:02,000
//! Chinese line 1
//!
//! 2
//! 00:00:03,000 --> 00:00:04,000
//! Chinese line 2
//! ```

use crate::error::AppError;
use regex::Regex;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;

static TIMING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+):(\d{2}):(\d{2})[,.](\d{1,3})\s*-->\s*(\d+):(\d{2}):(\d{2})[,.](\d{1,3})")
        .expect("timing regex is valid")
});

/// Point on the subtitle timeline, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// `None` when the value does not fit in a u64 of milliseconds
    pub fn from_parts(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Option<Self> {
        let minutes = hours.checked_mul(60)?.checked_add(minutes)?;
        let seconds = minutes.checked_mul(60)?.checked_add(seconds)?;
        let millis = seconds.checked_mul(1000)?.checked_add(millis)?;
        Some(Timestamp(millis))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.0 % 1000;
        let total_secs = self.0 / 1000;
        let secs = total_secs % 60;
        let mins = (total_secs / 60) % 60;
        let hours = total_secs / 3600;
        write!(f, "{:02}:{:02}:{:02},{:03}", hours, mins, secs, ms)
    }
}

/// One timed subtitle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    pub index: usize,
    pub start: Timestamp,
    pub end: Timestamp,
    pub text: String,
}

impl Cue {
    pub fn new(index: usize, start: Timestamp, end: Timestamp, text: impl Into<String>) -> Self {
        Self {
            index,
            start,
            end,
            text: text.into(),
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{} --> {}", self.start, self.end)?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Ordered cue sequence of one .srt file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtitleFile {
    pub cues: Vec<Cue>,
}

impl SubtitleFile {
    pub fn new(cues: Vec<Cue>) -> Self {
        Self { cues }
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn read(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse SubRip content. Line numbers in errors are 1-based.
    pub fn parse(content: &str) -> Result<Self, AppError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let content = content.replace("\r\n", "\n").replace('\r', "\n");

        let mut cues = Vec::new();
        let mut lines = content.split('\n').enumerate().peekable();

        loop {
            // Skip blank lines between blocks
            while lines.next_if(|(_, l)| l.trim().is_empty()).is_some() {}

            let Some((line_no, index_line)) = lines.next() else {
                break;
            };
            let index = index_line
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|i| *i > 0)
                .ok_or_else(|| {
                    AppError::subtitle(
                        line_no + 1,
                        format!("expected cue index, found '{}'", index_line.trim()),
                    )
                })?;

            let (timing_no, timing_line) = lines
                .next()
                .ok_or_else(|| AppError::subtitle(line_no + 2, "unexpected end of file"))?;
            let (start, end) = parse_timing(timing_line)
                .ok_or_else(|| AppError::subtitle(timing_no + 1, "invalid timing line"))?;

            let mut text_lines = Vec::new();
            while let Some((_, line)) = lines.next_if(|(_, l)| !l.trim().is_empty()) {
                text_lines.push(line);
            }

            cues.push(Cue::new(index, start, end, text_lines.join("\n")));
        }

        Ok(Self { cues })
    }

    /// Write the file through a sibling temp file so a failed write never truncates `path`
    pub fn write(&self, path: &Path) -> Result<(), AppError> {
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(self.to_string().as_bytes())?;
        tmp.flush()?;
        tmp.persist(path).map_err(|e| AppError::Io(e.error))?;
        Ok(())
    }
}

impl fmt::Display for SubtitleFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cue in &self.cues {
            write!(f, "{}", cue)?;
        }
        Ok(())
    }
}

/// Parse `HH:MM:SS,mmm --> HH:MM:SS,mmm`, ignoring trailing coordinates
fn parse_timing(line: &str) -> Option<(Timestamp, Timestamp)> {
    let caps = TIMING_LINE.captures(line)?;
    let num = |i: usize| caps.get(i)?.as_str().parse::<u64>().ok();
    let millis = |i: usize| {
        let s = caps.get(i)?.as_str();
        let value = s.parse::<u64>().ok()?;
        Some(match s.len() {
            1 => value * 100,
            2 => value * 10,
            _ => value,
        })
    };

    let start = Timestamp::from_parts(num(1)?, num(2)?, num(3)?, millis(4)?)?;
    let end = Timestamp::from_parts(num(5)?, num(6)?, num(7)?, millis(8)?)?;
    Some((start, end))
}
