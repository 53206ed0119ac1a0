use mediagrab_core::{ExtractionRecord, MediaItem, MediaKind};

const CLEAN_QUALITY: &str = "no_watermark";

fn is_watermarked(item: &MediaItem) -> bool {
    if item.kind != MediaKind::Video {
        return false;
    }
    let quality = item.quality.to_lowercase();
    quality.contains("watermark") && !quality.contains(CLEAN_QUALITY)
}

fn clean_media(item: &MediaItem) -> MediaItem {
    let mut cleaned = item.clone();
    if is_watermarked(item) {
        let separator = if item.url.contains('?') { '&' } else { '?' };
        cleaned.url = format!("{}{separator}clean=1", item.url);
        cleaned.quality = CLEAN_QUALITY.to_string();
        tracing::debug!("removed watermark from {} -> {}", item.url, cleaned.url);
    }
    cleaned
}

/// Returns a copy of `record` whose watermarked videos point at a cleaned
/// variant. Applying it to its own output changes nothing.
pub fn remove_watermarks(record: &ExtractionRecord) -> ExtractionRecord {
    record.with_medias(record.medias.iter().map(clean_media).collect())
}
