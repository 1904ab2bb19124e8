use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::error::{AllocatorError, Result};
use crate::models::{ColumnNames, RosterRow};

/// Write the roster as a single-sheet workbook with auto-fitted columns.
///
/// The workbook is assembled in memory and saved once, so a failure leaves
/// no file behind.
pub fn write_roster(path: &Path, rows: &[RosterRow], columns: &ColumnNames) -> Result<()> {
    build_workbook(rows, columns)
        .and_then(|mut workbook| workbook.save(path))
        .map_err(|e| AllocatorError::Export(format!("{}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), rows = rows.len(), "roster_written");
    Ok(())
}

fn build_workbook(rows: &[RosterRow], columns: &ColumnNames) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, header) in columns.roster_headers().iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write_string(r, 0, &row.identity.name)?;
        sheet.write_string(r, 1, &row.identity.student_id)?;
        sheet.write_string(r, 2, &row.sex)?;
        sheet.write_string(r, 3, &row.identity.contact)?;
        sheet.write_string(r, 4, row.window.to_string())?;
        if let Some(sequence) = row.sequence {
            sheet.write_number(r, 5, f64::from(sequence))?;
        }
    }

    sheet.autofit();
    Ok(workbook)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IdentityKey;
    use crate::services::{history, sheet_reader};

    fn rows() -> Vec<RosterRow> {
        vec![
            RosterRow {
                identity: IdentityKey::new("张三", "2021001", "13800000001"),
                sex: "男".into(),
                window: "2024-05-01 09:00 2024-05-01 10:00".parse().unwrap(),
                sequence: None,
            },
            RosterRow {
                identity: IdentityKey::new("李四", "0021002", "13800000002"),
                sex: "女".into(),
                window: "2024-05-01 14:00 2024-05-01 15:00".parse().unwrap(),
                sequence: Some(7),
            },
        ]
    }

    #[test]
    fn writes_six_columns_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("录取结果.xlsx");
        write_roster(&path, &rows(), &ColumnNames::default()).unwrap();

        let table = sheet_reader::read_table(&path).unwrap();
        assert_eq!(
            table.headers,
            vec!["姓名", "学号", "性别", "联系方式", "被录取时间段", "报名时间"]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 5), "");
        // Leading zeros survive because IDs are written as text.
        assert_eq!(table.cell(1, 1), "0021002");
        assert_eq!(table.cell(1, 4), "2024-05-01 14:00 2024-05-01 15:00");
        assert_eq!(table.cell(1, 5), "7");
    }

    #[test]
    fn output_reads_back_as_next_round_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("round1.xlsx");
        let written = rows();
        write_roster(&path, &written, &ColumnNames::default()).unwrap();

        let loaded = history::load_file(&path, &ColumnNames::default()).unwrap();
        assert_eq!(loaded, written);
    }

    #[test]
    fn unwritable_path_is_export_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.xlsx");
        assert!(matches!(
            write_roster(&path, &rows(), &ColumnNames::default()),
            Err(AllocatorError::Export(_))
        ));
        assert!(!path.exists());
    }
}
