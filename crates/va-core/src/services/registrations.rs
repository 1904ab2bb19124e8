use std::path::Path;

use crate::error::{AllocatorError, Result};
use crate::models::{ColumnNames, IdentityKey, Registrant};

use super::sheet_reader;
use super::table::Table;

/// Registrants read from a sign-up sheet, in sign-up order.
#[derive(Debug, Clone, Default)]
pub struct RegistrationSheet {
    pub registrants: Vec<Registrant>,
    /// Rows that were skipped, as human-readable notes.
    pub skipped: Vec<String>,
}

pub fn load_file(path: &Path, columns: &ColumnNames) -> Result<RegistrationSheet> {
    let table = sheet_reader::read_table(path)?;
    load(&table, columns)
}

/// Turn a sign-up table into registrants. Sequence numbers follow row order
/// starting at 1, counting only rows that reach the table: fully blank rows
/// are dropped by the sheet reader and take no number.
pub fn load(table: &Table, columns: &ColumnNames) -> Result<RegistrationSheet> {
    let require = |name: &str| {
        table
            .column(name)
            .ok_or_else(|| AllocatorError::MissingField(name.to_string()))
    };
    let selections = require(&columns.selections)?;
    let name = require(&columns.name)?;
    let student_id = require(&columns.student_id)?;
    let contact = require(&columns.contact)?;
    let sex = table.column(&columns.sex);

    let mut sheet = RegistrationSheet::default();
    for row in 0..table.len() {
        let sequence = row as u32 + 1;
        let identity = IdentityKey::new(
            table.cell(row, name),
            table.cell(row, student_id),
            table.cell(row, contact),
        );
        if identity.is_blank() {
            tracing::warn!(sequence, "skipping sign-up row without name, id or contact");
            sheet
                .skipped
                .push(format!("#{sequence}: no name, student id or contact"));
            continue;
        }
        sheet.registrants.push(Registrant {
            identity,
            sex: sex.map(|c| table.cell(row, c)).unwrap_or("").to_string(),
            selections: table.cell(row, selections).to_string(),
            sequence,
        });
    }

    tracing::debug!(
        registrants = sheet.registrants.len(),
        skipped = sheet.skipped.len(),
        "registrations_loaded"
    );
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::table::table;

    const HEADERS: &[&str] = &["姓名", "学号", "性别", "联系方式", "所选时间"];

    #[test]
    fn assigns_sequence_in_row_order() {
        let t = table(
            HEADERS,
            &[
                &["张三", "2021001", "男", "13800000001", "2024-05-01 09:00 2024-05-01 10:00"],
                &["李四", "2021002", "女", "13800000002", ""],
            ],
        );
        let sheet = load(&t, &ColumnNames::default()).unwrap();
        assert_eq!(sheet.registrants.len(), 2);
        assert_eq!(sheet.registrants[0].sequence, 1);
        assert_eq!(sheet.registrants[0].identity.name, "张三");
        assert_eq!(sheet.registrants[0].sex, "男");
        assert_eq!(sheet.registrants[1].sequence, 2);
        assert_eq!(sheet.registrants[1].identity.contact, "13800000002");
        assert!(sheet.skipped.is_empty());
    }

    #[test]
    fn missing_selection_column_is_error() {
        let t = table(&["姓名", "学号", "联系方式"], &[&["张三", "1", "2"]]);
        match load(&t, &ColumnNames::default()) {
            Err(AllocatorError::MissingField(col)) => assert_eq!(col, "所选时间"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn missing_identity_column_is_error() {
        let t = table(&["姓名", "学号", "所选时间"], &[]);
        assert!(matches!(
            load(&t, &ColumnNames::default()),
            Err(AllocatorError::MissingField(col)) if col == "联系方式"
        ));
    }

    #[test]
    fn sex_column_is_optional() {
        let t = table(
            &["姓名", "学号", "联系方式", "所选时间"],
            &[&["张三", "1", "2", ""]],
        );
        let sheet = load(&t, &ColumnNames::default()).unwrap();
        assert_eq!(sheet.registrants[0].sex, "");
    }

    #[test]
    fn blank_identity_rows_are_skipped_but_keep_their_number() {
        let t = table(
            HEADERS,
            &[
                &["", "", "", "", "2024-05-01 09:00 2024-05-01 10:00"],
                &["李四", "2021002", "女", "13800000002", ""],
            ],
        );
        let sheet = load(&t, &ColumnNames::default()).unwrap();
        assert_eq!(sheet.registrants.len(), 1);
        assert_eq!(sheet.registrants[0].sequence, 2);
        assert_eq!(sheet.skipped.len(), 1);
    }

    #[test]
    fn fully_blank_sheet_rows_take_no_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signups.xlsx");

        let mut workbook = rust_xlsxwriter::Workbook::new();
        let ws = workbook.add_worksheet();
        for (col, header) in HEADERS.iter().enumerate() {
            ws.write_string(0, col as u16, *header).unwrap();
        }
        ws.write_string(1, 0, "张三").unwrap();
        ws.write_string(1, 1, "2021001").unwrap();
        ws.write_string(1, 3, "13800000001").unwrap();
        // Sheet row 3 is left empty.
        ws.write_string(3, 0, "李四").unwrap();
        ws.write_string(3, 1, "2021002").unwrap();
        ws.write_string(3, 3, "13800000002").unwrap();
        workbook.save(&path).unwrap();

        let sheet = load_file(&path, &ColumnNames::default()).unwrap();
        let numbers: Vec<u32> = sheet.registrants.iter().map(|r| r.sequence).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(sheet.registrants[1].identity.name, "李四");
        assert!(sheet.skipped.is_empty());
    }

    #[test]
    fn custom_column_names() {
        let columns = ColumnNames {
            name: "Name".into(),
            student_id: "ID".into(),
            sex: "Sex".into(),
            contact: "Phone".into(),
            selections: "Slots".into(),
            ..ColumnNames::default()
        };
        let t = table(
            &["Name", "ID", "Phone", "Slots"],
            &[&["Ada", "7", "555", "2024-05-01 09:00 2024-05-01 10:00"]],
        );
        let sheet = load(&t, &columns).unwrap();
        assert_eq!(sheet.registrants[0].identity.student_id, "7");
    }
}
