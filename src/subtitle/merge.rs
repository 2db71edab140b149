use super::srt::{Cue, SubtitleFile, Timestamp};
use crate::error::AppError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Combines several subtitle timelines into one file
pub trait SubtitleMerger {
    fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<(), AppError>;
}

/// Splits the timeline at every cue boundary and stacks the texts active in
/// each slice, one line per input in input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimelineMerger;

impl SubtitleMerger for TimelineMerger {
    fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<(), AppError> {
        if inputs.len() < 2 {
            return Err(AppError::Merge(format!(
                "need at least two subtitle files, got {}",
                inputs.len()
            )));
        }

        let files = inputs
            .iter()
            .map(|p| {
                SubtitleFile::read(p)
                    .map_err(|e| AppError::Merge(format!("{}: {}", p.display(), e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let merged = merge_timelines(&files);
        debug!(
            "Merged {} file(s) into {} cue(s) at {}",
            files.len(),
            merged.len(),
            output.display()
        );
        merged.write(output)
    }
}

/// Merge parsed timelines. Output cues are renumbered from 1.
pub fn merge_timelines(files: &[SubtitleFile]) -> SubtitleFile {
    let mut boundaries: Vec<Timestamp> = files
        .iter()
        .flat_map(|f| f.cues.iter())
        .filter(|c| c.end > c.start)
        .flat_map(|c| [c.start, c.end])
        .collect();
    boundaries.sort();
    boundaries.dedup();

    let mut merged: Vec<Cue> = Vec::new();
    for window in boundaries.windows(2) {
        let (from, to) = (window[0], window[1]);

        let lines: Vec<&str> = files
            .iter()
            .flat_map(|f| f.cues.iter())
            .filter(|c| c.start <= from && c.end >= to && !c.text.is_empty())
            .map(|c| c.text.as_str())
            .collect();
        if lines.is_empty() {
            continue;
        }
        let text = lines.join("\n");

        if let Some(last) = merged.last_mut() {
            if last.end == from && last.text == text {
                last.end = to;
                continue;
            }
        }
        let index = merged.len() + 1;
        merged.push(Cue::new(index, from, to, text));
    }

    SubtitleFile::new(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(cues: &[(u64, u64, &str)]) -> SubtitleFile {
        SubtitleFile::new(
            cues.iter()
                .enumerate()
                .map(|(i, (s, e, t))| Cue::new(i + 1, Timestamp(*s), Timestamp(*e), *t))
                .collect(),
        )
    }

    #[test]
    fn test_aligned_cues_become_dual_line() {
        let zh = file(&[(1000, 2000, "Chinese line 1"), (3000, 4000, "Chinese line 2")]);
        let en = file(&[(1000, 2000, "English line 1"), (3000, 4000, "English line 2")]);

        let merged = merge_timelines(&[zh, en]);
        assert_eq!(
            merged.cues,
            vec![
                Cue::new(1, Timestamp(1000), Timestamp(2000), "Chinese line 1\nEnglish line 1"),
                Cue::new(2, Timestamp(3000), Timestamp(4000), "Chinese line 2\nEnglish line 2"),
            ]
        );
    }

    #[test]
    fn test_offset_cues_are_split() {
        let a = file(&[(0, 2000, "A")]);
        let b = file(&[(1000, 3000, "B")]);

        let merged = merge_timelines(&[a, b]);
        let texts: Vec<_> = merged.cues.iter().map(|c| (c.start.0, c.end.0, c.text.as_str())).collect();
        assert_eq!(
            texts,
            vec![(0, 1000, "A"), (1000, 2000, "A\nB"), (2000, 3000, "B")]
        );
    }

    #[test]
    fn test_adjacent_identical_slices_coalesce() {
        // the empty cue splits A at 1000 and 2000 without changing its text
        let a = file(&[(0, 3000, "A")]);
        let b = file(&[(1000, 2000, ""), (3000, 4000, "B"), (5000, 5000, "zero length")]);

        let merged = merge_timelines(&[a, b]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.cues[0], Cue::new(1, Timestamp(0), Timestamp(3000), "A"));
        assert_eq!(merged.cues[1], Cue::new(2, Timestamp(3000), Timestamp(4000), "B"));
    }

    #[test]
    fn test_three_inputs_concatenate_in_order() {
        let merged = merge_timelines(&[
            file(&[(0, 1000, "ja")]),
            file(&[(0, 1000, "ko")]),
            file(&[(0, 1000, "en")]),
        ]);
        assert_eq!(merged.cues[0].text, "ja\nko\nen");
    }

    #[test]
    fn test_merger_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("m.zh.srt");
        let b = dir.path().join("m.en.srt");
        std::fs::write(&a, "1\n00:00:01,000 --> 00:00:02,000\nChinese\n\n").unwrap();
        std::fs::write(&b, "1\n00:00:01,000 --> 00:00:02,000\nEnglish\n\n").unwrap();
        let out = dir.path().join("m.srt");

        TimelineMerger.merge(&[a, b], &out).unwrap();
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "1\n00:00:01,000 --> 00:00:02,000\nChinese\nEnglish\n\n"
        );
    }

    #[test]
    fn test_merger_rejects_single_input() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("m.srt");
        let result = TimelineMerger.merge(&[dir.path().join("only.srt")], &out);
        assert!(matches!(result, Err(AppError::Merge(_))));
        assert!(!out.exists());
    }
}
