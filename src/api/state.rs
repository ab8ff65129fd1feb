//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::store::{InMemoryStore, PayrollStore};

/// Shared application state.
///
/// Holds the service configuration, fixed at construction, and the store
/// that payroll runs are persisted to.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ServiceConfig>,
    store: Arc<dyn PayrollStore>,
}

impl AppState {
    /// Creates application state backed by an in-memory store.
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_store(config, Arc::new(InMemoryStore::new()))
    }

    /// Creates application state with a caller-provided store.
    pub fn with_store(config: ServiceConfig, store: Arc<dyn PayrollStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Returns the service configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Returns the payroll store.
    pub fn store(&self) -> &dyn PayrollStore {
        self.store.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeId, SalaryResult};
    use rust_decimal::Decimal;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_the_store() {
        let state = AppState::new(ServiceConfig::new("uploads", "outputs"));
        let clone = state.clone();
        let result = SalaryResult {
            employee_id: EmployeeId::from("E1"),
            employee_name: "Alice".to_string(),
            days_present: 0,
            attendance_factor: Decimal::ZERO,
            gross_salary: Decimal::ZERO,
            total_deductions: Decimal::ZERO,
            net_salary: Decimal::ZERO,
        };

        state.store().save_run(uuid::Uuid::new_v4(), None, &[result]).unwrap();

        assert_eq!(clone.store().list().unwrap().len(), 1);
        assert_eq!(clone.config().output_filename, "salary_tally_import.xlsx");
    }
}
