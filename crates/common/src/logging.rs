// huff-debug - Huff contract debugging through hevm
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Logging configuration for huff-debug components
//!
//! Provides centralized logging setup with:
//! - Compact console output on stderr, kept quiet by default so that hevm's
//!   interactive screen is not interleaved with log lines
//! - Optional file logging with daily rotation
//! - Environment variable support (RUST_LOG)

use eyre::Result;
use std::{env, fs, path::Path, sync::Once};
use tracing::Level;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    fmt::{self, time::LocalTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Initialize logging for huff-debug components
///
/// This function sets up:
/// - Compact console logging on stderr
/// - File logging into `log_dir` with daily rotation, when a directory is given
/// - Environment variable support for log levels (RUST_LOG)
/// - `default_level` if no RUST_LOG is set
///
/// # Arguments
/// * `component_name` - Name of the component (e.g., "huff-debug")
/// * `default_level` - Level used when RUST_LOG is not set
/// * `log_dir` - Directory for the rolling log file; `None` disables file logging
///
/// # Returns
/// The guard of the non-blocking file writer. Keep it alive until the process
/// exits, otherwise buffered lines are lost.
///
/// # Examples
/// ```rust,no_run
/// use huff_debug_common::logging;
/// use tracing::Level;
///
/// fn main() -> eyre::Result<()> {
///     let _guard = logging::init_logging("huff-debug", Level::WARN, None)?;
///     tracing::info!("Application started");
///     Ok(())
/// }
/// ```
pub fn init_logging(
    component_name: &str,
    default_level: Level,
    log_dir: Option<&Path>,
) -> Result<Option<WorkerGuard>> {
    let console_layer = fmt::layer()
        .with_target(false)
        .with_timer(LocalTime::rfc_3339())
        .with_writer(std::io::stderr)
        .compact()
        .with_filter(env_filter(default_level));

    let Some(log_dir) = log_dir else {
        tracing_subscriber::registry()
            .with(console_layer)
            .try_init()
            .map_err(|e| eyre::eyre!("Failed to initialize tracing subscriber: {}", e))?;

        tracing::debug!(component = component_name, "Logging initialized with console output only");
        log_environment_info(component_name);
        return Ok(None);
    };

    fs::create_dir_all(log_dir)?;

    let file_appender = rolling::daily(log_dir, format!("{component_name}.log"));
    let (non_blocking_appender, guard) = non_blocking(file_appender);

    // Files are more verbose than the console
    let file_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(LocalTime::rfc_3339())
        .with_ansi(false)
        .with_writer(non_blocking_appender)
        .with_filter(env_filter(Level::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize tracing subscriber: {}", e))?;

    tracing::debug!(
        component = component_name,
        log_dir = %log_dir.display(),
        "Logging initialized with console and file output"
    );
    log_environment_info(component_name);

    Ok(Some(guard))
}

/// Filter honouring RUST_LOG, falling back to `default_level`
fn env_filter(default_level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level.as_str()))
}

/// Log useful environment information
fn log_environment_info(component_name: &str) {
    let args: Vec<String> = env::args().collect();
    tracing::debug!(component = component_name, args = ?args, "Environment information");

    if let Ok(current_dir) = env::current_dir() {
        tracing::debug!(working_directory = %current_dir.display(), "Working directory");
    }
}

/// Initialize simple logging (console only, no fancy formatting)
///
/// This is useful for tests or simple utilities that don't need
/// the full logging setup.
///
/// # Arguments
/// * `level` - The default log level to use
pub fn init_simple_logging(level: Level) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_target(false)
        .with_test_writer()
        .compact()
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize simple logging: {}", e))?;

    Ok(())
}

// Global test logging initialization - ensures logging is only set up once across all tests
static TEST_LOGGING_INIT: Once = Once::new();

/// Safe logging initialization for tests - can be called multiple times without crashing
///
/// Console-only, INFO by default but respecting RUST_LOG. Initialization
/// happens at most once per test process.
///
/// # Usage
/// ```rust,no_run
/// use huff_debug_common::logging;
/// use tracing::info;
///
/// logging::ensure_test_logging(None);
/// info!("This will work safely in any test!");
/// ```
pub fn ensure_test_logging(default_level: Option<Level>) {
    TEST_LOGGING_INIT.call_once(|| {
        let default_level = default_level.unwrap_or(Level::INFO);
        // A subscriber may already be installed by another harness
        let _ = init_simple_logging(default_level);
    });
}
