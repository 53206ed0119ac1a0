use std::path::{Path, PathBuf};

use mediagrab_core::{ExtractionRecord, MediaError, MediaResult};
use serde::Serialize;

use crate::write_output;

pub const CSV_COLUMNS: [&str; 9] = [
    "url",
    "source",
    "author",
    "title",
    "thumbnail",
    "duration",
    "type",
    "error",
    "medias_json",
];

/// One flattened record; field order matches `CSV_COLUMNS`.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    url: &'a str,
    source: &'a str,
    author: &'a str,
    title: &'a str,
    thumbnail: &'a str,
    duration: u64,
    #[serde(rename = "type")]
    kind: &'static str,
    error: bool,
    medias_json: String,
}

impl<'a> CsvRow<'a> {
    fn from_record(record: &'a ExtractionRecord) -> MediaResult<Self> {
        let medias_json = serde_json::to_string(&record.medias)
            .map_err(|err| MediaError::Export(format!("failed to encode medias: {err}")))?;
        Ok(Self {
            url: &record.url,
            source: &record.source,
            author: &record.author,
            title: &record.title,
            thumbnail: &record.thumbnail,
            duration: record.duration,
            kind: record.kind.as_str(),
            error: record.error,
            medias_json,
        })
    }
}

/// One row per record with the media list as a JSON string column. The
/// header is always written, so an empty input gives a header-only file.
pub fn export_csv(records: &[ExtractionRecord], path: &Path) -> MediaResult<PathBuf> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(CSV_COLUMNS).map_err(csv_error)?;
    for record in records {
        writer
            .serialize(CsvRow::from_record(record)?)
            .map_err(csv_error)?;
    }
    let buffer = writer
        .into_inner()
        .map_err(|err| MediaError::Export(format!("failed to flush csv: {err}")))?;

    let path = write_output(path, &buffer)?;
    tracing::debug!("exported {} record(s) to csv: {}", records.len(), path.display());
    Ok(path)
}

fn csv_error(err: csv::Error) -> MediaError {
    MediaError::Export(format!("failed to encode csv: {err}"))
}
