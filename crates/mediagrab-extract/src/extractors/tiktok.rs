use mediagrab_core::{
    ExtractionRecord, MediaItem, MediaKind, MediaResult, RecordKind, UNKNOWN_AUTHOR,
};

use super::{Extractor, parse_lenient, path_segments, query_value};
use crate::hashing::{leading_u16, secondary_hash, short_hash};

const CDN: &str = "https://dummy.tiktokcdn.com";
const DEFAULT_DURATION_MS: u64 = 60_000;

#[derive(Debug, Clone, Default)]
pub struct TikTokExtractor;

impl TikTokExtractor {
    /// The id following `/video/` in the path, else 16 hex chars of the URL hash.
    pub fn video_id(input: &str) -> String {
        let url = parse_lenient(input);
        let segments = path_segments(url.as_ref());
        segments
            .iter()
            .position(|segment| segment == "video")
            .and_then(|idx| segments.get(idx + 1))
            .cloned()
            .unwrap_or_else(|| short_hash(input, 16))
    }

    /// The first `@handle` path segment, else the `author` query parameter.
    pub fn author(input: &str) -> String {
        let url = parse_lenient(input);
        path_segments(url.as_ref())
            .into_iter()
            .find(|segment| segment.starts_with('@'))
            .map(|segment| segment.trim_start_matches('@').to_string())
            .or_else(|| query_value(url.as_ref(), "author"))
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
    }

    /// Stable duration in milliseconds, between 10 and 240 seconds.
    pub fn duration_ms(video_id: &str) -> u64 {
        if video_id.is_empty() {
            return DEFAULT_DURATION_MS;
        }
        let value = u64::from(leading_u16(&secondary_hash(video_id)));
        (10 + value % 231) * 1000
    }
}

impl Extractor for TikTokExtractor {
    fn source(&self) -> &str {
        "tiktok"
    }

    fn extract(&self, url: &str) -> MediaResult<ExtractionRecord> {
        tracing::debug!("extracting tiktok url: {url}");
        let video_id = Self::video_id(url);
        let author = Self::author(url);
        let duration_ms = Self::duration_ms(&video_id);

        let medias = vec![
            MediaItem::new(
                format!("{CDN}/{video_id}_hd_no_watermark.mp4"),
                "hd_no_watermark",
                "mp4",
                MediaKind::Video,
            ),
            MediaItem::new(
                format!("{CDN}/{video_id}_no_watermark.mp4"),
                "no_watermark",
                "mp4",
                MediaKind::Video,
            ),
            MediaItem::new(
                format!("{CDN}/{video_id}_audio.mp3"),
                "audio",
                "mp3",
                MediaKind::Audio,
            )
            .with_duration(duration_ms / 1000),
        ];

        Ok(ExtractionRecord {
            url: url.to_string(),
            source: self.source().to_string(),
            title: format!("TikTok video by {author}"),
            author,
            thumbnail: format!("{CDN}/thumbnail/{video_id}.jpg"),
            duration: duration_ms,
            medias,
            kind: RecordKind::Multiple,
            error: false,
        })
    }
}
