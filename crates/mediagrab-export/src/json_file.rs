use std::fs;
use std::path::{Path, PathBuf};

use mediagrab_core::{ExtractionRecord, MediaError, MediaResult};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::write_output;

/// Pretty-printed UTF-8 JSON array, four-space indent.
pub fn export_json(records: &[ExtractionRecord], path: &Path) -> MediaResult<PathBuf> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    records
        .serialize(&mut serializer)
        .map_err(|err| MediaError::Export(format!("failed to encode json: {err}")))?;
    buffer.push(b'\n');

    let path = write_output(path, &buffer)?;
    tracing::debug!("exported {} record(s) to json: {}", records.len(), path.display());
    Ok(path)
}

pub fn read_json(path: &Path) -> MediaResult<Vec<ExtractionRecord>> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|err| MediaError::Parse(format!("failed to parse {}: {err}", path.display())))
}
