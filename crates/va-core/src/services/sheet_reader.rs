use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{AllocatorError, Result};
use crate::models::window::TIMESTAMP_FORMAT;

use super::table::Table;

/// Read the first worksheet of an `.xlsx`/`.xls`/`.ods` file.
///
/// The first non-blank row is the header. Fully blank rows after it are
/// dropped, so row positions in the returned table count non-blank rows only.
pub fn read_table(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| AllocatorError::Parse(format!("{}: {e}", path.display())))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AllocatorError::Parse(format!("{}: workbook has no sheets", path.display())))?
        .map_err(|e| AllocatorError::Parse(format!("{}: {e}", path.display())))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|c| !c.is_empty()));

    let Some(headers) = rows.next() else {
        tracing::warn!(path = %path.display(), "spreadsheet is empty");
        return Ok(Table::default());
    };
    let rows: Vec<Vec<String>> = rows.collect();

    tracing::debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "sheet_loaded"
    );
    Ok(Table::new(headers, rows))
}

/// Render a cell the way a person reading the sheet would type it.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        // IDs and phone numbers typed as numbers come back as floats.
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_else(|| dt.as_f64().to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn reads_headers_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signups.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "姓名").unwrap();
        sheet.write_string(0, 1, "学号").unwrap();
        sheet.write_string(0, 2, "所选时间").unwrap();
        sheet.write_string(1, 0, " 张三 ").unwrap();
        sheet.write_number(1, 1, 2021001.0).unwrap();
        sheet
            .write_string(1, 2, "2024-05-01 09:00 2024-05-01 10:00")
            .unwrap();
        // Row 2 left blank on purpose.
        sheet.write_string(3, 0, "李四").unwrap();
        sheet.write_number(3, 1, 12.5).unwrap();
        workbook.save(&path).unwrap();

        let table = read_table(&path).unwrap();
        assert_eq!(table.headers, vec!["姓名", "学号", "所选时间"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 0), "张三");
        assert_eq!(table.cell(0, 1), "2021001");
        assert_eq!(table.cell(0, 2), "2024-05-01 09:00 2024-05-01 10:00");
        assert_eq!(table.cell(1, 0), "李四");
        assert_eq!(table.cell(1, 1), "12.5");
        assert_eq!(table.cell(1, 2), "");
    }

    #[test]
    fn unreadable_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.xlsx");
        std::fs::write(&path, "definitely not a zip archive").unwrap();
        assert!(matches!(read_table(&path), Err(AllocatorError::Parse(_))));
    }

    #[test]
    fn missing_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_table(&dir.path().join("missing.xlsx")).unwrap_err();
        assert!(matches!(err, AllocatorError::Parse(_)));
        assert!(err.to_string().contains("missing.xlsx"));
    }
}
