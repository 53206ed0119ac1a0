use mediagrab_core::{ExtractionRecord, MediaItem, MediaKind, MediaResult, RecordKind};

use super::{Extractor, parse_lenient, path_segments, query_value};
use crate::hashing::{leading_u16, secondary_hash, short_hash, tertiary_hash};

const DEFAULT_DURATION_MS: u64 = 300_000;

#[derive(Debug, Clone, Default)]
pub struct YouTubeExtractor;

impl YouTubeExtractor {
    /// `youtu.be/<id>`, then `?v=<id>`, then 11 hex chars of the URL hash.
    pub fn video_id(input: &str) -> String {
        let url = parse_lenient(input);
        let short_form = url
            .as_ref()
            .filter(|url| url.host_str() == Some("youtu.be"))
            .and_then(|url| path_segments(Some(url)).into_iter().next());

        short_form
            .or_else(|| query_value(url.as_ref(), "v"))
            .unwrap_or_else(|| short_hash(input, 11))
    }

    /// Channel names are not available offline, so derive a stable stand-in.
    pub fn channel(video_id: &str) -> String {
        let digest = secondary_hash(video_id);
        format!("channel_{}", &digest[..8])
    }

    /// Stable duration in milliseconds, between 2 and 30 minutes.
    pub fn duration_ms(video_id: &str) -> u64 {
        if video_id.is_empty() {
            return DEFAULT_DURATION_MS;
        }
        let value = u64::from(leading_u16(&tertiary_hash(video_id)));
        (2 + value % 29) * 60 * 1000
    }
}

impl Extractor for YouTubeExtractor {
    fn source(&self) -> &str {
        "youtube"
    }

    fn extract(&self, url: &str) -> MediaResult<ExtractionRecord> {
        tracing::debug!("extracting youtube url: {url}");
        let video_id = Self::video_id(url);
        let watch = format!("https://youtube.com/watch?v={video_id}");

        let medias = vec![
            MediaItem::new(format!("{watch}&fmt=mp4_1080p"), "1080p", "mp4", MediaKind::Video),
            MediaItem::new(format!("{watch}&fmt=mp4_720p"), "720p", "mp4", MediaKind::Video),
            MediaItem::new(format!("{watch}&fmt=audio_mp3"), "audio", "mp3", MediaKind::Audio),
        ];

        Ok(ExtractionRecord {
            url: url.to_string(),
            source: self.source().to_string(),
            author: Self::channel(&video_id),
            title: format!("YouTube video {video_id}"),
            thumbnail: format!("https://img.youtube.com/vi/{video_id}/hqdefault.jpg"),
            duration: Self::duration_ms(&video_id),
            medias,
            kind: RecordKind::Multiple,
            error: false,
        })
    }
}
