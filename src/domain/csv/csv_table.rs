// ============================================================
// CSV TABLE
// ============================================================
// A parsed CSV file: header plus rows padded to the header width

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Cell values read as missing, matching the usual dataframe NA markers.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const MISSING_DISPLAY: &str = "NaN";
const COLUMN_GAP: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvTable {
    /// Column names from the header row
    pub headers: Vec<String>,

    /// Data rows, each exactly `headers.len()` cells long
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
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

    pub fn is_missing(value: &str) -> bool {
        MISSING_MARKERS.contains(&value)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn missing_value_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|value| Self::is_missing(value))
            .count()
    }

    /// Rows identical to some earlier row. Missing cells compare equal.
    pub fn duplicate_row_count(&self) -> usize {
        let mut seen: HashSet<Vec<Option<&str>>> = HashSet::new();
        self.rows
            .iter()
            .filter(|row| {
                let key = row
                    .iter()
                    .map(|value| (!Self::is_missing(value)).then_some(value.as_str()))
                    .collect::<Vec<_>>();
                !seen.insert(key)
            })
            .count()
    }

    /// Fixed-width text rendering: index column left-aligned, cells right-aligned.
    pub fn render(&self) -> String {
        if self.rows.is_empty() {
            return format!(
                "Empty DataFrame\nColumns: [{}]\nIndex: []",
                self.headers.join(", ")
            );
        }

        let cells: Vec<Vec<&str>> = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|value| {
                        if Self::is_missing(value) {
                            MISSING_DISPLAY
                        } else {
                            value.as_str()
                        }
                    })
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                cells
                    .iter()
                    .map(|row| row[col].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let index_width = (self.rows.len() - 1).to_string().len();

        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        let mut header_line = " ".repeat(index_width);
        for (header, width) in self.headers.iter().zip(&widths) {
            header_line.push_str(COLUMN_GAP);
            header_line.push_str(&pad_left(header, *width));
        }
        lines.push(header_line);

        for (index, row) in cells.iter().enumerate() {
            let mut line = format!("{:<width$}", index, width = index_width);
            for (value, width) in row.iter().zip(&widths) {
                line.push_str(COLUMN_GAP);
                line.push_str(&pad_left(value, *width));
            }
            lines.push(line);
        }

        lines.join("\n")
    }
}

fn pad_left(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        value.to_string()
    } else {
        format!("{}{}", " ".repeat(width - len), value)
    }
}
