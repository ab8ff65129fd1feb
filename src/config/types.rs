//! Configuration types for the payroll service.
//!
//! This module contains the strongly-typed configuration structure that is
//! deserialized from the service's YAML configuration file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::DEFAULT_WORKING_DAYS;

/// Configuration of the payroll service collaborators.
///
/// Every directory and default is passed into the service at construction
/// time; nothing is read from process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Directory uploaded input workbooks are read from.
    pub upload_dir: PathBuf,
    /// Directory generated reports are written to.
    pub output_dir: PathBuf,
    /// Base file name of generated reports; each run's report carries the
    /// run id before the extension.
    #[serde(default = "default_output_filename")]
    pub output_filename: String,
    /// Accepted input file extensions, lower-case and without the dot.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
    /// Working days used when a request does not supply its own.
    #[serde(default = "default_working_days")]
    pub default_working_days: i64,
    /// Address the HTTP service listens on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl ServiceConfig {
    /// Creates a configuration with defaults for everything but the directories.
    pub fn new(upload_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            output_dir: output_dir.into(),
            output_filename: default_output_filename(),
            allowed_extensions: default_allowed_extensions(),
            default_working_days: default_working_days(),
            bind_address: default_bind_address(),
        }
    }

    /// Returns true if a file name carries an accepted extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::config::ServiceConfig;
    ///
    /// let config = ServiceConfig::new("uploads", "outputs");
    /// assert!(config.is_allowed_file("attendance.XLSX"));
    /// assert!(!config.is_allowed_file("attendance.csv"));
    /// assert!(!config.is_allowed_file("xlsx"));
    /// ```
    pub fn is_allowed_file(&self, filename: &str) -> bool {
        filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .is_some_and(|ext| self.allowed_extensions.iter().any(|allowed| *allowed == ext))
    }

    /// Returns the report file name for a run.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::config::ServiceConfig;
    /// use uuid::Uuid;
    ///
    /// let config = ServiceConfig::new("uploads", "outputs");
    /// let run_id = Uuid::nil();
    /// assert_eq!(
    ///     config.report_filename(run_id),
    ///     "salary_tally_import_00000000000000000000000000000000.xlsx"
    /// );
    /// ```
    pub fn report_filename(&self, run_id: Uuid) -> String {
        match self.output_filename.rsplit_once('.') {
            Some((stem, ext)) => format!("{}_{}.{}", stem, run_id.simple(), ext),
            None => format!("{}_{}", self.output_filename, run_id.simple()),
        }
    }

    /// Returns the path a run's report is written to.
    pub fn report_path(&self, run_id: Uuid) -> PathBuf {
        self.output_dir.join(self.report_filename(run_id))
    }
}

fn default_output_filename() -> String {
    "salary_tally_import.xlsx".to_string()
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["xlsx".to_string()]
}

fn default_working_days() -> i64 {
    DEFAULT_WORKING_DAYS
}

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}
