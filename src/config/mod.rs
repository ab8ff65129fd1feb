//! Configuration loading for the payroll service.
//!
//! This module loads the service configuration (upload and output
//! directories, report file name, accepted extensions and the default
//! working-day count) from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("Uploads are read from {}", config.config().upload_dir.display());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::ServiceConfig;
