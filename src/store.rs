//! Persistence of payroll runs.
//!
//! The core engine does not depend on this module. It gives collaborators a
//! seam for storing results together with the period they cover and for
//! listing them later, plus an in-memory implementation used by the HTTP
//! service.

use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{PayrollError, PayrollResult};
use crate::export::ReportRecord;
use crate::models::{PayPeriod, SalaryResult};

/// A salary result as held by a store.
///
/// Fields are optional because records may be reloaded from storage that
/// predates a field or was edited by hand. The exporter rejects records that
/// lack a report value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSalaryRecord {
    /// The run the record belongs to.
    pub run_id: Uuid,
    /// When the run was stored.
    pub stored_at: DateTime<Utc>,
    /// The employee identifier.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// The employee display name.
    #[serde(default)]
    pub employee_name: Option<String>,
    /// Days present in the run.
    #[serde(default)]
    pub days_present: Option<u32>,
    /// Gross salary at full precision.
    #[serde(default)]
    pub gross_salary: Option<Decimal>,
    /// Total deductions at full precision.
    #[serde(default)]
    pub total_deductions: Option<Decimal>,
    /// Net salary at full precision.
    #[serde(default)]
    pub net_salary: Option<Decimal>,
    /// First day of the payroll period, if the run had a window.
    #[serde(default)]
    pub period_start: Option<NaiveDate>,
    /// Last day of the payroll period, if the run had a window.
    #[serde(default)]
    pub period_end: Option<NaiveDate>,
}

impl StoredSalaryRecord {
    /// Builds a stored record from a computed result.
    pub fn from_result(
        run_id: Uuid,
        stored_at: DateTime<Utc>,
        period: Option<&PayPeriod>,
        result: &SalaryResult,
    ) -> Self {
        Self {
            run_id,
            stored_at,
            employee_id: Some(result.employee_id.to_string()),
            employee_name: Some(result.employee_name.clone()),
            days_present: Some(result.days_present),
            gross_salary: Some(result.gross_salary),
            total_deductions: Some(result.total_deductions),
            net_salary: Some(result.net_salary),
            period_start: period.map(|p| p.start_date),
            period_end: period.map(|p| p.end_date),
        }
    }
}

impl ReportRecord for StoredSalaryRecord {
    fn employee_id(&self) -> Option<&str> {
        self.employee_id.as_deref()
    }

    fn employee_name(&self) -> Option<&str> {
        self.employee_name.as_deref()
    }

    fn net_salary(&self) -> Option<Decimal> {
        self.net_salary
    }

    fn total_deductions(&self) -> Option<Decimal> {
        self.total_deductions
    }

    fn gross_salary(&self) -> Option<Decimal> {
        self.gross_salary
    }
}

/// Durable storage for payroll runs.
pub trait PayrollStore: Send + Sync {
    /// Stores every result of one run under the given run identifier.
    fn save_run(
        &self,
        run_id: Uuid,
        period: Option<&PayPeriod>,
        results: &[SalaryResult],
    ) -> PayrollResult<()>;

    /// Lists all stored records, oldest run first.
    fn list(&self) -> PayrollResult<Vec<StoredSalaryRecord>>;
}

/// A [`PayrollStore`] that keeps records in process memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: Mutex<Vec<StoredSalaryRecord>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PayrollStore for InMemoryStore {
    fn save_run(
        &self,
        run_id: Uuid,
        period: Option<&PayPeriod>,
        results: &[SalaryResult],
    ) -> PayrollResult<()> {
        let stored_at = Utc::now();
        let mut records = self.records.lock().map_err(|_| PayrollError::StorageError {
            message: "record store lock poisoned".to_string(),
        })?;
        records.extend(
            results
                .iter()
                .map(|result| StoredSalaryRecord::from_result(run_id, stored_at, period, result)),
        );
        info!(run_id = %run_id, records = results.len(), "Stored payroll run");
        Ok(())
    }

    fn list(&self) -> PayrollResult<Vec<StoredSalaryRecord>> {
        let records = self.records.lock().map_err(|_| PayrollError::StorageError {
            message: "record store lock poisoned".to_string(),
        })?;
        Ok(records.clone())
    }
}
