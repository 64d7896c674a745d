use crate::storage::TableData;
use crate::types::Row;
use crate::types::value::value_to_string;

/// Formats rows as a pipe-delimited grid with left-justified columns.
///
/// Each column is as wide as its longest header or cell; NULL cells render
/// empty. With `suppress_first_column` the identifier column is dropped
/// before widths are computed.
pub fn render(headers: &[String], rows: &[Row], suppress_first_column: bool) -> String {
    let skip = usize::from(suppress_first_column);
    let headers: Vec<&str> = headers.iter().skip(skip).map(String::as_str).collect();
    if headers.is_empty() {
        return String::new();
    }

    // Render every cell up front; missing trailing cells are empty
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            (0..headers.len())
                .map(|i| row.get(i + skip).map(value_to_string).unwrap_or_default())
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(cells.len() + 2);
    lines.push(format_line(headers.iter().copied(), &widths));
    lines.push("-".repeat(widths.iter().sum::<usize>() + widths.len()));
    for row in &cells {
        lines.push(format_line(row.iter().map(String::as_str), &widths));
    }
    lines.join("\n")
}

fn format_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}|"))
        .collect()
}

impl TableData {
    pub fn render(&self, suppress_first_column: bool) -> String {
        render(&self.headers, &self.rows, suppress_first_column)
    }
}
