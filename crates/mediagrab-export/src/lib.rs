//! File exporters for extraction records.
//!
//! Every exporter renders the whole file in memory and writes it with a
//! single call, creating missing parent directories first.

mod csv_file;
mod json_file;
mod slideshow;
mod spreadsheet;

use std::fs;
use std::path::{Path, PathBuf};

use mediagrab_core::{ExtractionRecord, MediaResult};

pub use csv_file::{CSV_COLUMNS, export_csv};
pub use json_file::{export_json, read_json};
pub use slideshow::{slideshow_frames, write_slideshow, write_slideshows};
pub use spreadsheet::{CellValue, SHEET_COLUMNS, export_spreadsheet, sheet_rows};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Excel,
}

impl ExportFormat {
    pub fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim().to_lowercase();
        match normalized.as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "excel" | "xlsx" | "spreadsheet" => Some(Self::Excel),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Excel => "xlsx",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Csv => "CSV",
            Self::Excel => "Excel",
        }
    }
}

/// Parses format names in order, dropping duplicates. Unknown names are
/// logged and skipped.
pub fn resolve_formats<S: AsRef<str>>(names: &[S]) -> Vec<ExportFormat> {
    let mut formats = Vec::new();
    for name in names {
        match ExportFormat::parse(name.as_ref()) {
            Some(format) if !formats.contains(&format) => formats.push(format),
            Some(_) => {}
            None => tracing::warn!("ignoring unknown output format '{}'", name.as_ref()),
        }
    }
    formats
}

/// Writes `<output_dir>/<stem>.<ext>` in the given format.
pub fn export_records(
    records: &[ExtractionRecord],
    format: ExportFormat,
    output_dir: &Path,
    stem: &str,
) -> MediaResult<PathBuf> {
    let path = output_dir.join(format!("{stem}.{}", format.extension()));
    let path = match format {
        ExportFormat::Json => export_json(records, &path)?,
        ExportFormat::Csv => export_csv(records, &path)?,
        ExportFormat::Excel => export_spreadsheet(records, &path)?,
    };
    tracing::info!("{} exported to {}", format.label(), path.display());
    Ok(path)
}

pub(crate) fn write_output(path: &Path, bytes: &[u8]) -> MediaResult<PathBuf> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediagrab_core::MediaError;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_format_aliases() {
        assert_eq!(ExportFormat::parse("JSON"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::parse(" csv "), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::parse("excel"), Some(ExportFormat::Excel));
        assert_eq!(ExportFormat::parse("xlsx"), Some(ExportFormat::Excel));
        assert_eq!(ExportFormat::parse("pdf"), None);
    }

    #[test]
    fn resolve_formats_dedupes_and_skips_unknown() {
        let formats = resolve_formats(&["csv", "json", "CSV", "yaml", "xlsx", "excel"]);
        assert_eq!(
            formats,
            vec![ExportFormat::Csv, ExportFormat::Json, ExportFormat::Excel]
        );
    }

    #[test]
    fn export_records_names_files_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_records(&[], ExportFormat::Csv, dir.path(), "batch").unwrap();
        assert_eq!(path, dir.path().join("batch.csv"));
        assert!(path.exists());
    }

    #[test]
    fn write_failures_surface_as_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        // parent "directory" is a regular file
        let result = export_records(&[], ExportFormat::Json, &blocker, "out");
        assert!(matches!(result, Err(MediaError::Io(_))));
    }
}
