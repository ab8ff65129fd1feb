//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::calculation::validate_working_days;
use crate::error::{PayrollError, PayrollResult};

use super::types::ServiceConfig;

/// Loads and validates the service configuration.
///
/// # File Format
///
/// ```text
/// upload_dir: uploads
/// output_dir: outputs
/// output_filename: salary_tally_import.xlsx   # optional
/// allowed_extensions: [xlsx]                  # optional
/// default_working_days: 30                    # optional
/// bind_address: 127.0.0.1:8080                # optional
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll.yaml")?;
/// println!("Reports go to {}", loader.config().output_dir.display());
/// # Ok::<(), payroll_engine::error::PayrollError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ServiceConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file is not valid YAML or lacks a required field (`ConfigParseError`)
    /// - `default_working_days` is not positive (`ConfigurationError`)
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml(&content).map_err(|e| match e {
            PayrollError::ConfigParseError { message, .. } => PayrollError::ConfigParseError {
                path: path_str,
                message,
            },
            other => other,
        })
    }

    /// Parses and validates configuration from YAML text.
    pub fn from_yaml(content: &str) -> PayrollResult<Self> {
        let config: ServiceConfig =
            serde_yaml::from_str(content).map_err(|e| PayrollError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        Self::from_config(config)
    }

    /// Validates an already constructed configuration.
    pub fn from_config(config: ServiceConfig) -> PayrollResult<Self> {
        validate_working_days(config.default_working_days)?;
        if config.output_filename.trim().is_empty() {
            return Err(PayrollError::ConfigurationError {
                message: "output_filename must not be empty".to_string(),
            });
        }
        if config.allowed_extensions.is_empty() {
            return Err(PayrollError::ConfigurationError {
                message: "allowed_extensions must list at least one extension".to_string(),
            });
        }
        Ok(Self { config })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> ServiceConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_shipped_configuration() {
        let loader = ConfigLoader::load("./config/payroll.yaml").unwrap();
        let config = loader.config();

        assert_eq!(config.output_filename, "salary_tally_import.xlsx");
        assert_eq!(config.allowed_extensions, vec!["xlsx"]);
        assert_eq!(config.default_working_days, 30);
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        match ConfigLoader::load("/nonexistent/payroll.yaml") {
            Err(PayrollError::ConfigNotFound { path }) => {
                assert!(path.contains("payroll.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_yaml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "upload_dir: [unclosed").unwrap();

        match ConfigLoader::load(&path) {
            Err(PayrollError::ConfigParseError { path, .. }) => {
                assert!(path.ends_with("bad.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_field_is_parse_error() {
        let result = ConfigLoader::from_yaml("upload_dir: uploads\n");
        assert!(matches!(
            result,
            Err(PayrollError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_non_positive_default_working_days_is_rejected() {
        let yaml = "upload_dir: uploads\noutput_dir: outputs\ndefault_working_days: 0\n";
        assert!(matches!(
            ConfigLoader::from_yaml(yaml),
            Err(PayrollError::ConfigurationError { .. })
        ));
    }

    #[test]
    fn test_empty_extension_list_is_rejected() {
        let yaml = "upload_dir: uploads\noutput_dir: outputs\nallowed_extensions: []\n";
        assert!(matches!(
            ConfigLoader::from_yaml(yaml),
            Err(PayrollError::ConfigurationError { .. })
        ));
    }
}
