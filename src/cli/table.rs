//! # ASCII Table Formatter
//!
//! Renders records as MySQL-style ASCII tables:
//!
//! ```text
//! +----+-------+-----+
//! | ID | name  | age |
//! +----+-------+-----+
//! | 1  | Alice | 30  |
//! | 2  | Bob   | 25  |
//! +----+-------+-----+
//! ```
//!
//! Column widths are the widest of the header and the values, capped at
//! `MAX_COLUMN_WIDTH` characters; longer cells are truncated with `...`.
//! Columns missing from a record render as empty cells.

use std::fmt::Write;

use crate::sql::types::Record;

const MAX_COLUMN_WIDTH: usize = 50;

pub struct TableFormatter {
    headers: Vec<String>,
    widths: Vec<usize>,
    rows: Vec<Vec<String>>,
}

impl TableFormatter {
    pub fn new(headers: Vec<String>, records: &[Record]) -> Self {
        let mut widths: Vec<usize> = headers.iter().map(|h| width_of(h).clamp(1, MAX_COLUMN_WIDTH)).collect();

        let rows: Vec<Vec<String>> = records
            .iter()
            .map(|record| {
                headers
                    .iter()
                    .enumerate()
                    .map(|(i, header)| {
                        let formatted = record.get(header).map(|v| v.to_string()).unwrap_or_default();
                        widths[i] = widths[i].max(width_of(&formatted)).min(MAX_COLUMN_WIDTH);
                        formatted
                    })
                    .collect()
            })
            .collect();

        Self { headers, widths, rows }
    }

    pub fn render(&self) -> String {
        let mut output = String::new();

        self.write_separator(&mut output);
        self.write_row(&mut output, &self.headers);
        self.write_separator(&mut output);
        for row in &self.rows {
            self.write_row(&mut output, row);
        }
        self.write_separator(&mut output);

        output
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn write_separator(&self, output: &mut String) {
        output.push('+');
        for width in &self.widths {
            output.push_str(&"-".repeat(width + 2));
            output.push('+');
        }
        output.push('\n');
    }

    fn write_row(&self, output: &mut String, cells: &[String]) {
        output.push('|');
        for (cell, width) in cells.iter().zip(&self.widths) {
            let cell = truncate(cell, *width);
            let padding = width - width_of(&cell);
            let _ = write!(output, " {}{} |", cell, " ".repeat(padding));
        }
        output.push('\n');
    }
}

/// Display width in characters
fn width_of(s: &str) -> usize {
    s.chars().count()
}

fn truncate(s: &str, max_len: usize) -> String {
    if width_of(s) <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let mut result: String = s.chars().take(max_len - 3).collect();
        result.push_str("...");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::types::Value;

    fn headers() -> Vec<String> {
        vec!["ID".to_string(), "name".to_string()]
    }

    fn record(id: i64, name: &str) -> Record {
        Record::from([
            ("ID".to_string(), Value::Integer(id)),
            ("name".to_string(), Value::String(name.to_string())),
        ])
    }

    #[test]
    fn empty_table_renders_headers_only() {
        let formatter = TableFormatter::new(headers(), &[]);
        let output = formatter.render();

        assert_eq!(output, "+----+------+\n| ID | name |\n+----+------+\n+----+------+\n");
        assert_eq!(formatter.row_count(), 0);
    }

    #[test]
    fn rows_are_padded_to_widest_cell() {
        let formatter = TableFormatter::new(headers(), &[record(1, "Alice"), record(22, "Bo")]);
        let output = formatter.render();

        assert!(output.contains("| ID | name  |"));
        assert!(output.contains("| 1  | Alice |"));
        assert!(output.contains("| 22 | Bo    |"));
        assert_eq!(formatter.row_count(), 2);
    }

    #[test]
    fn non_ascii_cells_align() {
        let formatter = TableFormatter::new(headers(), &[record(1, "Пётр")]);
        assert!(formatter.render().contains("| 1  | Пётр |"));
    }

    #[test]
    fn long_values_are_truncated() {
        let long = "x".repeat(80);
        let formatter = TableFormatter::new(headers(), &[record(1, &long)]);
        let output = formatter.render();

        let expected = format!("{}...", "x".repeat(MAX_COLUMN_WIDTH - 3));
        assert!(output.contains(&expected));
        assert!(!output.contains(&long));
    }

    #[test]
    fn missing_columns_render_empty() {
        let partial = Record::from([("ID".to_string(), Value::Integer(7))]);
        let output = TableFormatter::new(headers(), &[partial]).render();
        assert!(output.contains("| 7  |      |"));
    }
}
