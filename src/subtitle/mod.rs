pub mod merge;
pub mod normalize;
pub mod srt;

pub use merge::{SubtitleMerger, TimelineMerger};
pub use normalize::normalize_file;
pub use srt::{Cue, SubtitleFile, Timestamp};
