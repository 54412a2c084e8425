//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! the command implementations.

use crate::app::services::qid_registry::QidRegistry;
use crate::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Processing statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    /// Number of rows read from the input
    pub rows_read: usize,
    /// Number of sheets successfully decoded
    pub rows_decoded: usize,
    /// Number of rows skipped due to validation failures
    pub rows_skipped: usize,
    /// Number of recovery-table entries loaded
    pub qids_loaded: usize,
    /// Per-row validation errors collected during the run
    pub errors: Vec<String>,
    /// Total processing time
    pub processing_time: Duration,
    /// Output file name and size in bytes, when one was written
    pub output_size: Option<(String, u64)>,
}

impl ProcessingStats {
    /// Success rate over all rows read, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.rows_read == 0 {
            0.0
        } else {
            (self.rows_decoded as f64 / self.rows_read as f64) * 100.0
        }
    }

    /// Format a byte count in human-readable form
    pub fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

/// Set up structured logging for a command
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("omr_extractor={}", log_level)));

    if quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load the questionnaire-id recovery table, if one was supplied
pub fn load_registry(qids_path: &Option<PathBuf>) -> Result<QidRegistry> {
    match qids_path {
        Some(path) => {
            let registry = QidRegistry::load(path)?;
            info!(
                "Recovery table loaded: {} entries from {}",
                registry.len(),
                path.display()
            );
            Ok(registry)
        }
        None => {
            debug!("No recovery table supplied");
            Ok(QidRegistry::empty())
        }
    }
}

/// Create a spinner for batch progress with appropriate styling
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
