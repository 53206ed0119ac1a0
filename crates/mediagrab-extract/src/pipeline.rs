use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use mediagrab_core::{ExtractionRecord, MediaError, MediaResult};

use crate::extractors::{
    Extractor, GenericExtractor, InstagramExtractor, TikTokExtractor, YouTubeExtractor,
};
use crate::platform::{Platform, detect_platform};
use crate::watermark::remove_watermarks;

/// Drives URL → platform → extractor → post-processing, one record per URL.
pub struct Pipeline {
    extractors: HashMap<Platform, Box<dyn Extractor>>,
    enable_watermark_removal: bool,
}

impl Pipeline {
    pub fn new(enable_watermark_removal: bool) -> Self {
        let mut extractors: HashMap<Platform, Box<dyn Extractor>> = HashMap::new();
        extractors.insert(Platform::TikTok, Box::new(TikTokExtractor));
        extractors.insert(Platform::YouTube, Box::new(YouTubeExtractor));
        extractors.insert(Platform::Instagram, Box::new(InstagramExtractor));
        Self {
            extractors,
            enable_watermark_removal,
        }
    }

    /// Replaces the extractor used for `platform`.
    pub fn with_extractor(mut self, platform: Platform, extractor: Box<dyn Extractor>) -> Self {
        self.extractors.insert(platform, extractor);
        self
    }

    /// Processes every URL in order. A failing URL yields an error record
    /// instead of aborting the batch.
    pub fn run<S: AsRef<str>>(&self, urls: &[S]) -> Vec<ExtractionRecord> {
        urls.iter().map(|url| self.process(url.as_ref())).collect()
    }

    pub fn process(&self, url: &str) -> ExtractionRecord {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.try_process(url)));
        let failure = match outcome {
            Ok(Ok(record)) => return record,
            Ok(Err(err)) => err,
            Err(payload) => MediaError::Extraction(panic_message(payload.as_ref())),
        };

        tracing::error!("error processing url {url}: {failure}");
        let source = panic::catch_unwind(|| detect_platform(url)).unwrap_or(Platform::Unknown);
        ExtractionRecord::failed(url, source.as_str())
    }

    fn try_process(&self, url: &str) -> MediaResult<ExtractionRecord> {
        let platform = detect_platform(url);
        tracing::info!("processing url: {url} (platform={platform})");

        let record = match self.extractors.get(&platform) {
            Some(extractor) => extractor.extract(url)?,
            None => GenericExtractor::new(platform.as_str()).extract(url)?,
        };

        if self.enable_watermark_removal {
            return Ok(remove_watermarks(&record));
        }
        Ok(record)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Runs the built-in pipeline over `urls`.
pub fn run<S: AsRef<str>>(urls: &[S], enable_watermark_removal: bool) -> Vec<ExtractionRecord> {
    Pipeline::new(enable_watermark_removal).run(urls)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return format!("extractor panicked: {message}");
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return format!("extractor panicked: {message}");
    }
    "extractor panicked".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediagrab_core::{FAILED_TITLE, MediaItem, MediaKind, RecordKind};
    use pretty_assertions::assert_eq;

    struct FailingExtractor;

    impl Extractor for FailingExtractor {
        fn source(&self) -> &str {
            "youtube"
        }

        fn extract(&self, _url: &str) -> MediaResult<ExtractionRecord> {
            Err(MediaError::Extraction("forced failure".to_string()))
        }
    }

    struct PanickingExtractor;

    impl Extractor for PanickingExtractor {
        fn source(&self) -> &str {
            "instagram"
        }

        fn extract(&self, _url: &str) -> MediaResult<ExtractionRecord> {
            panic!("boom")
        }
    }

    struct WatermarkedExtractor;

    impl Extractor for WatermarkedExtractor {
        fn source(&self) -> &str {
            "tiktok"
        }

        fn extract(&self, url: &str) -> MediaResult<ExtractionRecord> {
            Ok(ExtractionRecord {
                url: url.to_string(),
                source: "tiktok".to_string(),
                author: "a".to_string(),
                title: "t".to_string(),
                thumbnail: String::new(),
                duration: 0,
                medias: vec![MediaItem::new(
                    "https://cdn/v.mp4",
                    "watermark",
                    "mp4",
                    MediaKind::Video,
                )],
                kind: RecordKind::Multiple,
                error: false,
            })
        }
    }

    const URLS: [&str; 4] = [
        "https://www.tiktok.com/@alice/video/123456",
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "https://instagram.com/p/ABCDEF1234/",
        "https://example.com/@dave/clip",
    ];

    #[test]
    fn keeps_input_order_and_length() {
        let records = run(&URLS, true);
        let sources: Vec<_> = records.iter().map(|r| r.source.as_str()).collect();
        assert_eq!(sources, vec!["tiktok", "youtube", "instagram", "unknown"]);
        let urls: Vec<_> = records.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, URLS.to_vec());
        assert!(records.iter().all(|r| !r.error));
    }

    #[test]
    fn routes_platforms_without_extractor_to_generic_with_their_tag() {
        let records = run(
            &[
                "https://www.facebook.com/watch/?v=1",
                "https://www.reddit.com/r/rust/",
                "https://open.spotify.com/track/4Km5HrUvYTaSUfiSGPJeQR",
                "not a url",
            ],
            true,
        );
        let sources: Vec<_> = records.iter().map(|r| r.source.as_str()).collect();
        assert_eq!(sources, vec!["facebook", "reddit", "spotify", "unknown"]);
        assert_eq!(records[0].title, "Media from facebook");
        assert!(records.iter().all(|r| r.medias[0].extension == "bin"));
    }

    #[test]
    fn contains_a_failing_extractor() {
        let pipeline = Pipeline::new(true).with_extractor(Platform::YouTube, Box::new(FailingExtractor));
        let records = pipeline.run(&URLS);

        assert_eq!(records.len(), URLS.len());
        let failed: Vec<_> = records.iter().filter(|r| r.error).collect();
        assert_eq!(failed.len(), 1);

        let failed = failed[0];
        assert_eq!(failed.url, URLS[1]);
        assert_eq!(failed.source, "youtube");
        assert_eq!(failed.author, "unknown");
        assert_eq!(failed.title, FAILED_TITLE);
        assert!(failed.medias.is_empty());

        let baseline = run(&URLS, true);
        assert_eq!(records[0], baseline[0]);
        assert_eq!(records[2], baseline[2]);
        assert_eq!(records[3], baseline[3]);
    }

    #[test]
    fn contains_a_panicking_extractor() {
        let pipeline =
            Pipeline::new(true).with_extractor(Platform::Instagram, Box::new(PanickingExtractor));
        let records = pipeline.run(&URLS);
        assert_eq!(records.len(), URLS.len());
        assert!(records[2].error);
        assert_eq!(records[2].source, "instagram");
        assert_eq!(records.iter().filter(|r| r.error).count(), 1);
    }

    #[test]
    fn watermark_removal_is_optional() {
        let url = ["https://www.tiktok.com/@a/video/1"];
        let cleaned = Pipeline::new(true)
            .with_extractor(Platform::TikTok, Box::new(WatermarkedExtractor))
            .run(&url);
        assert_eq!(cleaned[0].medias[0].quality, "no_watermark");
        assert_eq!(cleaned[0].medias[0].url, "https://cdn/v.mp4?clean=1");

        let raw = Pipeline::new(false)
            .with_extractor(Platform::TikTok, Box::new(WatermarkedExtractor))
            .run(&url);
        assert_eq!(raw[0].medias[0].quality, "watermark");
    }

    #[test]
    fn same_urls_give_same_records() {
        assert_eq!(run(&URLS, true), run(&URLS, true));
    }

    #[test]
    fn empty_batch() {
        let urls: [&str; 0] = [];
        assert!(run(&urls, true).is_empty());
    }
}
