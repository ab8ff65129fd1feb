//! Identification of the three payroll inputs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies which of the three payroll input tables a value came from.
///
/// Used to label errors and log fields so a caller can tell the user which
/// upload to fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// The base salary roster.
    Roster,
    /// The daily attendance log.
    Attendance,
    /// The deduction ledger.
    Deductions,
}

impl InputKind {
    /// All inputs, in pipeline order.
    pub const ALL: [InputKind; 3] = [
        InputKind::Roster,
        InputKind::Attendance,
        InputKind::Deductions,
    ];

    /// Returns the request field that carries this input's file.
    pub fn field_name(self) -> &'static str {
        match self {
            InputKind::Roster => "base_salary_file",
            InputKind::Attendance => "attendance_file",
            InputKind::Deductions => "deductions_file",
        }
    }

    /// Looks up an input by its request field name.
    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.field_name() == name)
    }

    /// Returns the label shown to users for this input's upload.
    pub fn upload_label(self) -> &'static str {
        match self {
            InputKind::Roster => "Base Salary File",
            InputKind::Attendance => "Attendance File",
            InputKind::Deductions => "Deductions File",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InputKind::Roster => "base salary",
            InputKind::Attendance => "attendance",
            InputKind::Deductions => "deductions",
        };
        f.write_str(label)
    }
}
