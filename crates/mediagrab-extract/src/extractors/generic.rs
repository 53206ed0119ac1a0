use mediagrab_core::{
    ExtractionRecord, MediaItem, MediaKind, MediaResult, RecordKind, UNKNOWN_AUTHOR,
};

use super::Extractor;

/// Fallback for platforms without a dedicated extractor. The raw URL becomes
/// the only media item.
#[derive(Debug, Clone)]
pub struct GenericExtractor {
    source: String,
}

impl GenericExtractor {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn author(url: &str) -> String {
        url.split('/')
            .find(|part| part.contains('@') && part.len() > 1)
            .map(|part| part.trim_matches('@').to_string())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
    }
}

impl Extractor for GenericExtractor {
    fn source(&self) -> &str {
        &self.source
    }

    fn extract(&self, url: &str) -> MediaResult<ExtractionRecord> {
        tracing::debug!("extracting {} url with generic extractor: {url}", self.source);
        Ok(ExtractionRecord {
            url: url.to_string(),
            source: self.source.clone(),
            author: Self::author(url),
            title: format!("Media from {}", self.source),
            thumbnail: String::new(),
            duration: 0,
            medias: vec![MediaItem::new(url, "original", "bin", MediaKind::Multiple)],
            kind: RecordKind::Multiple,
            error: false,
        })
    }
}
