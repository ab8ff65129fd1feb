//! Payroll Engine for attendance-based salaries
//!
//! This crate computes monthly salaries from three spreadsheets (a base
//! salary roster, a daily attendance log and a deduction ledger) and
//! exports the results as a workbook ready for import into an accounting
//! package. Pay is pro-rated by days present over the working days of the
//! period, then reduced by the employee's deductions.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod store;
pub mod table;
