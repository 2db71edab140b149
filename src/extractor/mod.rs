pub mod command_builder;
pub mod ffmpeg;

pub use command_builder::{ExtractionRequest, media_stem};
pub use ffmpeg::extract_track;
