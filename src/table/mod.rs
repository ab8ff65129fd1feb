//! In-memory tabular relations and the spreadsheet loader.
//!
//! A [`Table`] keeps the column names and row order of one input sheet
//! without enforcing any schema. Column names are normalised when the table
//! is built so that `Employee_ID`, `Employee ID` and `employee_id` all address
//! the same column.
//!
//! # Example
//!
//! ```
//! use payroll_engine::models::InputKind;
//! use payroll_engine::table::{Cell, Table};
//!
//! let table = Table::from_rows(
//!     InputKind::Roster,
//!     vec!["Employee_ID", "Employee Name", "Base_Salary"],
//!     vec![vec![Cell::from("E1"), Cell::from("Alice"), Cell::Int(3000)]],
//! );
//! assert!(table.has_column("employee_name"));
//! assert_eq!(table.len(), 1);
//! ```

mod cell;
mod loader;

pub use cell::Cell;
pub use loader::load_table;

use crate::models::InputKind;

/// Normalises a header cell into its column name.
///
/// Trims, lower-cases and collapses runs of whitespace, hyphens and
/// underscores into a single `_`.
///
/// # Examples
///
/// ```
/// use payroll_engine::table::normalize_column;
///
/// assert_eq!(normalize_column(" Employee_ID "), "employee_id");
/// assert_eq!(normalize_column("Other  Expenses"), "other_expenses");
/// assert_eq!(normalize_column("base-salary"), "base_salary");
/// ```
pub fn normalize_column(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// One data row of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// The 1-based spreadsheet row number (the header is row 1).
    pub number: usize,
    /// The cells of the row, in column order.
    pub cells: Vec<Cell>,
}

/// A relation read from one payroll input.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    kind: InputKind,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Builds a table from a header and data rows.
    ///
    /// Data rows are numbered as spreadsheet rows starting at 2. Rows with
    /// no values at all are dropped.
    pub fn from_rows<S: AsRef<str>>(
        kind: InputKind,
        headers: Vec<S>,
        rows: Vec<Vec<Cell>>,
    ) -> Self {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, cells)| Row {
                number: i + 2,
                cells,
            })
            .collect();
        Self::with_numbered_rows(kind, headers, rows)
    }

    pub(crate) fn with_numbered_rows<S: AsRef<str>>(
        kind: InputKind,
        headers: Vec<S>,
        rows: Vec<Row>,
    ) -> Self {
        let columns = headers
            .iter()
            .map(|h| normalize_column(h.as_ref()))
            .collect();
        let rows = rows
            .into_iter()
            .filter(|row| !row.cells.iter().all(Cell::is_empty))
            .collect();
        Self {
            kind,
            columns,
            rows,
        }
    }

    /// Returns which input this table was read from.
    pub fn kind(&self) -> InputKind {
        self.kind
    }

    /// Returns the normalised column names in sheet order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns true if the table has a column with the given normalised name.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Returns the position of the first column with the given name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns the data rows in sheet order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Row {
    /// Returns the cell at `index`, or [`Cell::Empty`] for short rows.
    pub fn cell(&self, index: usize) -> &Cell {
        const EMPTY: &Cell = &Cell::Empty;
        self.cells.get(index).unwrap_or(EMPTY)
    }
}
