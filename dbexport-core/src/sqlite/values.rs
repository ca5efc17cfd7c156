//! Decoding result rows into [`CellValue`]s.
//!
//! SQLite is dynamically typed: a column declared INTEGER may hold text in
//! some rows. Cells are therefore decoded by the storage class of each value,
//! not by the declared column type.

use crate::models::CellValue;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

/// Column names of a result row, in result order.
pub fn column_names(row: &SqliteRow) -> Vec<String> {
    row.columns()
        .iter()
        .map(|column| column.name().to_string())
        .collect()
}

/// Decodes every cell of a row.
pub fn decode_row(row: &SqliteRow) -> Result<Vec<CellValue>, sqlx::Error> {
    (0..row.len()).map(|index| decode_cell(row, index)).collect()
}

/// Decodes one cell by its runtime storage class.
///
/// TEXT that is not valid UTF-8 is returned as a BLOB so no bytes are lost.
pub fn decode_cell(row: &SqliteRow, index: usize) -> Result<CellValue, sqlx::Error> {
    let storage_class = {
        let raw = row.try_get_raw(index)?;
        if raw.is_null() {
            return Ok(CellValue::Null);
        }
        raw.type_info().name().to_string()
    };

    match storage_class.as_str() {
        "INTEGER" => row.try_get_unchecked::<i64, _>(index).map(CellValue::Integer),
        "REAL" => row.try_get_unchecked::<f64, _>(index).map(CellValue::Real),
        "BLOB" => row.try_get_unchecked::<Vec<u8>, _>(index).map(CellValue::Blob),
        other => {
            tracing::trace!("Decoding column {} ({}) as text", index, other);
            match row.try_get_unchecked::<String, _>(index) {
                Ok(text) => Ok(CellValue::Text(text)),
                Err(_) => row
                    .try_get_unchecked::<Vec<u8>, _>(index)
                    .map(CellValue::Blob),
            }
        }
    }
}
