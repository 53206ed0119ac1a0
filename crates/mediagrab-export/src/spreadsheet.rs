use std::path::{Path, PathBuf};

use mediagrab_core::{ExtractionRecord, MediaError, MediaResult};
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, XlsxError};

use crate::write_output;

pub const SHEET_COLUMNS: [&str; 9] = [
    "url",
    "source",
    "author",
    "title",
    "thumbnail",
    "duration",
    "medias",
    "type",
    "error",
];

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

/// Cell values for each record, in `SHEET_COLUMNS` order. The media list is
/// not a scalar, so it is stored as its JSON text.
pub fn sheet_rows(records: &[ExtractionRecord]) -> MediaResult<Vec<Vec<CellValue>>> {
    records
        .iter()
        .map(|record| {
            let medias = serde_json::to_string(&record.medias)
                .map_err(|err| MediaError::Export(format!("failed to encode medias: {err}")))?;
            Ok(vec![
                CellValue::Text(record.url.clone()),
                CellValue::Text(record.source.clone()),
                CellValue::Text(record.author.clone()),
                CellValue::Text(record.title.clone()),
                CellValue::Text(record.thumbnail.clone()),
                CellValue::Number(record.duration as f64),
                CellValue::Text(medias),
                CellValue::Text(record.kind.as_str().to_string()),
                CellValue::Bool(record.error),
            ])
        })
        .collect()
}

pub fn export_spreadsheet(records: &[ExtractionRecord], path: &Path) -> MediaResult<PathBuf> {
    let rows = sheet_rows(records)?;

    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, name) in SHEET_COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as ColNum, *name, &header)
            .map_err(xlsx_error)?;
    }

    for (idx, cells) in rows.iter().enumerate() {
        let row = RowNum::try_from(idx + 1)
            .map_err(|_| MediaError::Export("too many rows for a worksheet".to_string()))?;
        for (col, cell) in cells.iter().enumerate() {
            let col = col as ColNum;
            match cell {
                CellValue::Text(text) => worksheet.write_string(row, col, text),
                CellValue::Number(number) => worksheet.write_number(row, col, *number),
                CellValue::Bool(flag) => worksheet.write_boolean(row, col, *flag),
            }
            .map_err(xlsx_error)?;
        }
    }

    let buffer = workbook.save_to_buffer().map_err(xlsx_error)?;
    let path = write_output(path, &buffer)?;
    tracing::debug!("exported {} record(s) to excel: {}", rows.len(), path.display());
    Ok(path)
}

fn xlsx_error(err: XlsxError) -> MediaError {
    MediaError::Export(format!("failed to build workbook: {err}"))
}
