// src/services/sheet.rs

//! CSV encoding and decoding for the tracked ranking log.
//!
//! Files carry a UTF-8 byte-order mark so spreadsheet tools open them with
//! the right encoding. Reading is lenient: an empty or unreadable prior
//! file means "no existing rows", never a fatal error.

use crate::error::{AppError, Result};

/// UTF-8 byte-order mark.
pub const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Capture-timestamp column label.
pub const CAPTURED_AT_HEADER: &str = "取得日時";

/// Column labels of the nine extracted fields, as printed on the page.
pub const RANKING_HEADERS: [&str; 9] = [
    "順位",
    "座席数",
    "回数",
    "箱平均",
    "番箱",
    "取得館",
    "上映館",
    "取得率",
    "タイトル",
];

/// Header row for append mode: capture timestamp plus the nine fields.
pub fn append_header() -> Vec<String> {
    std::iter::once(CAPTURED_AT_HEADER)
        .chain(RANKING_HEADERS)
        .map(str::to_string)
        .collect()
}

/// Header row for create mode: the nine fields only.
pub fn create_header() -> Vec<String> {
    RANKING_HEADERS.iter().map(|h| h.to_string()).collect()
}

/// Decode CSV bytes into rows, tolerating a leading BOM.
///
/// An unreadable file is logged and treated as empty, matching the
/// start-from-scratch policy for a damaged prior log.
pub fn read_rows(bytes: &[u8]) -> Vec<Vec<String>> {
    let data = bytes.strip_prefix(&BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut rows = Vec::new();
    for record in reader.records() {
        match record {
            Ok(record) => rows.push(record.iter().map(str::to_string).collect()),
            Err(e) => {
                log::warn!("Existing CSV is unreadable: {e}. Starting from an empty record set.");
                return Vec::new();
            }
        }
    }
    rows
}

/// Encode rows as CSV bytes with a leading BOM.
pub fn write_rows(rows: &[Vec<String>]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::from(BOM));
    for row in rows {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::storage("csv encode", e))
}
