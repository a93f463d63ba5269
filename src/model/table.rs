//! Table types.

use super::Align;
use serde::{Deserialize, Serialize};

/// A table of literal text cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,

    /// Number of header rows (0 = no header)
    pub header_rows: u8,

    /// Relative column widths (optional; equal widths when absent)
    pub column_widths: Option<Vec<f32>>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            header_rows: 0,
            column_widths: None,
        }
    }

    /// Create a table with header.
    pub fn with_header(header_rows: u8) -> Self {
        Self {
            header_rows,
            ..Self::new()
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get header rows.
    pub fn header(&self) -> &[TableRow] {
        let n = (self.header_rows as usize).min(self.rows.len());
        &self.rows[..n]
    }

    /// Get body rows (non-header).
    pub fn body(&self) -> &[TableRow] {
        let n = (self.header_rows as usize).min(self.rows.len());
        &self.rows[n..]
    }

    /// Column widths as fractions of `total` summing to `total`.
    pub fn resolved_widths(&self, total: f32) -> Vec<f32> {
        let columns = self.column_count();
        if columns == 0 {
            return Vec::new();
        }
        match &self.column_widths {
            Some(weights) if weights.len() == columns && weights.iter().sum::<f32>() > 0.0 => {
                let sum: f32 = weights.iter().sum();
                weights.iter().map(|w| total * w / sum).collect()
            }
            _ => vec![total / columns as f32; columns],
        }
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,

    /// Whether this is a header row
    pub is_header: bool,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: false,
        }
    }

    /// Create a header row.
    pub fn header(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: true,
        }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell text
    pub text: String,

    /// Cell alignment
    pub alignment: Align,
}

impl TableCell {
    /// Create a new cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            alignment: Align::Left,
        }
    }

    /// Set alignment and return self.
    pub fn align(mut self, alignment: Align) -> Self {
        self.alignment = alignment;
        self
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let table = Table::new();
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
        assert!(table.resolved_widths(100.0).is_empty());
    }

    #[test]
    fn test_table_with_data() {
        let mut table = Table::with_header(1);
        table.add_row(TableRow::header(vec![
            TableCell::text("Year"),
            TableCell::text("Revenue"),
        ]));
        table.add_row(TableRow::from_strings(["2025", "$120,000"]));
        table.add_row(TableRow::from_strings(["2026", "$180,000"]));

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.header().len(), 1);
        assert_eq!(table.body().len(), 2);
        assert_eq!(table.plain_text().lines().next(), Some("Year\tRevenue"));
    }

    #[test]
    fn test_resolved_widths() {
        let mut table = Table::new();
        table.add_row(TableRow::from_strings(["a", "b", "c", "d"]));
        assert_eq!(table.resolved_widths(400.0), vec![100.0; 4]);

        table.column_widths = Some(vec![1.0, 1.0, 1.0, 2.0]);
        assert_eq!(table.resolved_widths(500.0), vec![100.0, 100.0, 100.0, 200.0]);
    }

    #[test]
    fn test_header_rows_beyond_table() {
        let mut table = Table::with_header(3);
        table.add_row(TableRow::from_strings(["only"]));
        assert_eq!(table.header().len(), 1);
        assert!(table.body().is_empty());
    }
}
