use serde::{Deserialize, Serialize};

pub const UNKNOWN_AUTHOR: &str = "unknown";
pub const FAILED_TITLE: &str = "Extraction failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Image,
    Audio,
    Multiple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Image,
    Multiple,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Image => "image",
            RecordKind::Multiple => "multiple",
        }
    }
}

/// One downloadable asset. `duration` is in seconds and only set on audio tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub url: String,
    pub quality: String,
    pub extension: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
}

impl MediaItem {
    pub fn new(
        url: impl Into<String>,
        quality: impl Into<String>,
        extension: impl Into<String>,
        kind: MediaKind,
    ) -> Self {
        Self {
            url: url.into(),
            quality: quality.into(),
            extension: extension.into(),
            kind,
            duration: None,
        }
    }

    pub fn with_duration(mut self, seconds: u64) -> Self {
        self.duration = Some(seconds);
        self
    }
}

/// The normalized result of processing one input URL. `duration` is in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    pub url: String,
    pub source: String,
    pub author: String,
    pub title: String,
    pub thumbnail: String,
    pub duration: u64,
    pub medias: Vec<MediaItem>,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub error: bool,
}

impl ExtractionRecord {
    /// Placeholder for a URL whose extraction failed. Carries no media.
    pub fn failed(url: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            source: source.into(),
            author: UNKNOWN_AUTHOR.to_string(),
            title: FAILED_TITLE.to_string(),
            thumbnail: String::new(),
            duration: 0,
            medias: Vec::new(),
            kind: RecordKind::Multiple,
            error: true,
        }
    }

    /// Same record with its media list replaced; the original is left untouched.
    pub fn with_medias(&self, medias: Vec<MediaItem>) -> Self {
        Self {
            medias,
            ..self.clone()
        }
    }
}
