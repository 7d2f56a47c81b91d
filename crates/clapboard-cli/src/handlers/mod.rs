//! Command handlers - extracted from main.rs for testability
//!
//! Each handler module contains:
//! - The execution logic for a CLI command
//! - A pure text renderer for its report
//! - Tests

pub mod compose;
pub mod detect;
pub mod finish;
pub mod plan;

pub use compose::execute_compose;
pub use detect::{execute_detect, render_detect_report, DetectReport};
pub use finish::{default_work_dir, execute_finish, render_finish_report};
pub use plan::{execute_plan, render_plan};

use crate::error::{CliError, CliResult};
use serde::Serialize;

/// Pretty-printed JSON for a report.
pub(crate) fn to_json<T: Serialize>(report: &T) -> CliResult<String> {
    serde_json::to_string_pretty(report)
        .map_err(|e| CliError::report_generation(format!("JSON serialization error: {e}")))
}
