//! Pipe tables.
//!
//! [`TableValue`] is the structural form shared by all three representations:
//!
//! ```text
//! | Name | Role |        TableValue {              <table>
//! | --- | --- |    <=>      headers: [Name, Role], <=>  <thead>...</thead>
//! | Ann | **Lead** |        rows: [[Ann, **Lead**]]    <tbody>...</tbody>
//!                         }                          </table>
//! ```
//!
//! Cells hold Markdown inline text; the HTML side runs it through the restricted
//! [`cell::CellContent`] grammar. A literal `|` inside a cell cannot be escaped:
//! it always splits the cell.

pub mod cell;
pub mod html;

pub use cell::{CellContent, CellRun};
pub use html::{html_to_table, table_to_html};

use serde::{Deserialize, Serialize};

/// Headers plus rows; every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableValue {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableValue {
    /// Build a table, padding short rows with empty cells and truncating long ones.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// Outcome of [`validate_table`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Split one table line into trimmed cells, dropping the outer pipes.
fn split_row(line: &str) -> Vec<String> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);
    line.split('|').map(|s| s.trim().to_string()).collect()
}

fn table_lines(text: &str) -> Vec<&str> {
    text.trim().lines().collect()
}

/// Parse pipe-table text.
///
/// Permissive: the separator line is skipped without looking at it. Returns
/// `None` when there are fewer than three lines or the header has no named column.
pub fn parse_table(text: &str) -> Option<TableValue> {
    let lines = table_lines(text);
    if lines.len() < 3 {
        return None;
    }

    let headers: Vec<String> = split_row(lines[0])
        .into_iter()
        .filter(|cell| !cell.is_empty())
        .collect();
    if headers.is_empty() {
        return None;
    }

    let rows = lines[2..].iter().map(|line| split_row(line)).collect();
    Some(TableValue::new(headers, rows))
}

/// Strict validation used for linting; reports every problem found.
pub fn validate_table(text: &str) -> TableValidation {
    let lines = table_lines(text);
    let mut errors = Vec::new();

    if lines.len() < 3 {
        errors.push(
            "Table must have at least 3 lines (header, separator, and at least one data row)"
                .to_string(),
        );
    }

    if let Some(header) = lines.first() {
        if split_row(header).iter().all(|cell| cell.is_empty()) {
            errors.push("Header row must contain at least one column name".to_string());
        }
    }

    if let Some(separator) = lines.get(1) {
        let allowed = separator
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':') || c.is_whitespace());
        if !allowed {
            errors.push(
                "Separator line may only contain '|', '-', ':' and whitespace".to_string(),
            );
        }
    }

    for (idx, line) in lines.iter().enumerate().skip(2) {
        if !line.contains('|') {
            errors.push(format!("Row {} must contain at least one '|'", idx - 1));
        }
    }

    TableValidation {
        valid: errors.is_empty(),
        errors,
    }
}

/// Serialize to pipe-table text (no trailing newline).
pub fn serialize_table(table: &TableValue) -> String {
    let width = table.column_count();
    let mut lines = Vec::with_capacity(table.rows.len() + 2);

    lines.push(format_row(&table.headers));
    lines.push(format_row(&vec!["---".to_string(); width]));
    for row in &table.rows {
        let cells: Vec<String> = (0..width)
            .map(|i| row.get(i).cloned().unwrap_or_default())
            .collect();
        lines.push(format_row(&cells));
    }

    lines.join("\n")
}

fn format_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

/// True when `line` looks like a separator row (`| --- | :-: |`).
pub(crate) fn is_separator_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.contains('-')
        && trimmed.contains('|')
        && trimmed
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':') || c.is_whitespace())
}
