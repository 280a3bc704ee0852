use super::{FormatError, Result};
use crate::model::{RawTable, RawValue};
use calamine::{open_workbook_auto, DataType, Reader};
use std::path::Path;

fn to_raw(cell: &DataType) -> RawValue {
    match cell {
        DataType::Int(i) => RawValue::Number(*i as f64),
        DataType::Float(f) => RawValue::Number(*f),
        DataType::String(s) if s.is_empty() => RawValue::Empty,
        DataType::String(s) => RawValue::Text(s.clone()),
        DataType::Bool(b) => RawValue::Bool(*b),
        DataType::DateTime(f) => RawValue::Number(*f),
        _ => RawValue::Empty,
    }
}

/// Read the first worksheet; its first row holds the headers.
pub fn read_spreadsheet(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path)?;
    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| FormatError::EmptyWorkbook(path.display().to_string()))?;
    let sheet = workbook
        .worksheet_range(&first_sheet)
        .ok_or_else(|| FormatError::EmptyWorkbook(path.display().to_string()))??;

    let mut rows = sheet.rows();
    let headers: Vec<String> = match rows.next() {
        Some(first_row) => first_row.iter().map(|c| to_raw(c).to_string()).collect(),
        None => return Ok(RawTable::default()),
    };

    let mut table = RawTable::new(headers);
    for row in rows {
        let cells: Vec<RawValue> = row.iter().map(to_raw).collect();
        if cells.iter().all(RawValue::is_empty) {
            continue;
        }
        table.push_row(cells);
    }

    tracing::debug!(sheet = %first_sheet, rows = table.len(), "read worksheet");
    Ok(table)
}
