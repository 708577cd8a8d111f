//! File logging for Easy Paint apps.
//!
//! Logs go to a rotated file in the app's config directory. Warnings and
//! errors are also echoed to stderr.

use crate::storage::{self, Result};
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};

/// Default filter; `RUST_LOG` overrides it.
const DEFAULT_SPEC: &str = "info, eframe=warn, egui_glow=warn, egui_winit=warn, winit=warn";

/// Maximum size of one log file before it is rotated.
const MAX_LOG_SIZE: u64 = 64 * 1024;

/// Start logging for `app_name`.
///
/// The returned handle must be kept alive for as long as the app runs;
/// dropping it flushes and stops the logger.
pub fn init_logging(app_name: &str) -> Result<LoggerHandle> {
    let log_dir = storage::config_dir(app_name);
    std::fs::create_dir_all(&log_dir)?;

    let handle = Logger::try_with_env_or_str(DEFAULT_SPEC)?
        .log_to_file(
            FileSpec::default()
                .directory(&log_dir)
                .basename(app_name)
                .suffix("log")
                .suppress_timestamp(),
        )
        .rotate(Criterion::Size(MAX_LOG_SIZE), Naming::Numbers, Cleanup::KeepLogFiles(3))
        .duplicate_to_stderr(Duplicate::Warn)
        .start()?;
    Ok(handle)
}
