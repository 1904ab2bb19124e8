use std::path::Path;

use crate::error::{AllocatorError, Result};
use crate::models::{ColumnNames, IdentityKey, RosterRow, TimeWindow};

use super::sheet_reader;
use super::table::Table;
use super::window_parser;

pub fn load_file(path: &Path, columns: &ColumnNames) -> Result<Vec<RosterRow>> {
    let table = sheet_reader::read_table(path)?;
    load(&table, columns)
}

/// Read a roster produced by an earlier round.
///
/// When no column carries the window header, the first column holding a
/// date-like cell is taken as the window column and the first window literal
/// of each of its cells is used.
pub fn load(table: &Table, columns: &ColumnNames) -> Result<Vec<RosterRow>> {
    let (window_col, detected) = match table.column(&columns.window) {
        Some(idx) => (Some(idx), false),
        None => (detect_window_column(table), true),
    };

    let name = table.column(&columns.name);
    let student_id = table.column(&columns.student_id);
    let contact = table.column(&columns.contact);

    let missing: Vec<&str> = [
        (name, columns.name.as_str()),
        (student_id, columns.student_id.as_str()),
        (contact, columns.contact.as_str()),
        (window_col, columns.window.as_str()),
    ]
    .into_iter()
    .filter(|(idx, _)| idx.is_none())
    .map(|(_, header)| header)
    .collect();

    let (Some(name), Some(student_id), Some(contact), Some(window_col)) =
        (name, student_id, contact, window_col)
    else {
        return Err(AllocatorError::InvalidHistory(format!(
            "missing required columns: {}",
            missing.join(", ")
        )));
    };

    if detected {
        tracing::debug!(
            column = %table.headers[window_col],
            "history window column detected by content"
        );
    }

    let sex = table.column(&columns.sex);
    let sequence = table.column(&columns.sequence);

    let mut rows = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let raw = table.cell(row, window_col);
        let window = parse_history_window(raw, detected).ok_or_else(|| {
            AllocatorError::InvalidHistory(format!(
                "row {}: no time window in '{raw}'",
                row + 2
            ))
        })?;

        rows.push(RosterRow {
            identity: IdentityKey::new(
                table.cell(row, name),
                table.cell(row, student_id),
                table.cell(row, contact),
            ),
            sex: sex.map(|c| table.cell(row, c)).unwrap_or("").to_string(),
            window,
            sequence: sequence.and_then(|c| table.cell(row, c).parse().ok()),
        });
    }

    tracing::debug!(rows = rows.len(), "history_loaded");
    Ok(rows)
}

/// A window column named as such holds exact literals; a detected one may
/// carry extra text around the first literal.
fn parse_history_window(raw: &str, detected: bool) -> Option<TimeWindow> {
    if detected {
        window_parser::first_window(raw)
    } else {
        raw.parse()
            .ok()
            .or_else(|| window_parser::first_window(raw))
    }
}

fn detect_window_column(table: &Table) -> Option<usize> {
    (0..table.headers.len())
        .find(|&col| table.column_cells(col).any(window_parser::looks_like_date))
}
