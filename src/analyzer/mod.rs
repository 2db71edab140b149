pub mod ffprobe;

pub use ffprobe::{inspect, probe_subtitle_tracks};
