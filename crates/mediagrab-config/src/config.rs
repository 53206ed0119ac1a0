use serde::{Deserialize, Serialize};

pub const DEFAULT_FORMAT: &str = "json";
pub const DEFAULT_FILE_STEM: &str = "example_output";
pub const DEFAULT_OUTPUT_DIR: &str = "data";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_formats: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_stem: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProcessingConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_watermark_removal: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MediaGrabConfig {
    pub output: OutputConfig,
    pub processing: ProcessingConfig,
}
