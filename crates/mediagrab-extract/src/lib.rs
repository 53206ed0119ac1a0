//! Platform detection, synthetic extraction and record post-processing.

pub mod extractors;
mod hashing;
pub mod pipeline;
mod platform;
pub mod watermark;

pub use extractors::{
    Extractor, GenericExtractor, InstagramExtractor, TikTokExtractor, YouTubeExtractor,
};
pub use hashing::short_hash;
pub use pipeline::{Pipeline, run};
pub use platform::{Platform, detect_platform};
pub use watermark::remove_watermarks;
