//! HTTP API module for the payroll engine.
//!
//! This module exposes payroll runs over REST: computing a run from uploaded
//! workbooks, downloading the generated report and listing stored results.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{XLSX_CONTENT_TYPE, create_router};
pub use request::PayrollRequest;
pub use response::{ApiError, PayrollResponse};
pub use state::AppState;
