//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! multiple CLI command implementations.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{debug, info};

use crate::cli::args::Args;
use crate::config::Config;
use crate::error::Result;

/// Outcome of a command, for the exit status and final log line
#[derive(Debug, Clone, Default)]
pub struct CommandSummary {
    /// Files successfully decoded
    pub files_decoded: usize,
    /// Records produced (catalog lines or table rows)
    pub records: usize,
    /// Files or species that failed
    pub failures: usize,
    pub elapsed: Duration,
}

impl CommandSummary {
    pub fn is_success(&self) -> bool {
        self.failures == 0
    }

    /// Format a duration for human output
    pub fn format_duration(duration: Duration) -> String {
        let secs = duration.as_secs_f64();
        if secs < 1.0 {
            format!("{:.0} ms", secs * 1000.0)
        } else if secs < 60.0 {
            format!("{:.2} s", secs)
        } else {
            format!("{}m {:02}s", duration.as_secs() / 60, duration.as_secs() % 60)
        }
    }
}

/// Load configuration using layered approach (file -> env -> args)
pub fn load_configuration(args: &Args) -> Result<Config> {
    let mut config = Config::load(args.config_file.as_deref())?;
    config.apply_env()?;

    if let Some(level) = args.get_log_level() {
        config = config.with_log_level(level);
    }
    if let Some(workers) = args.get_workers() {
        config = config.with_workers(workers);
    }
    if args.quiet {
        config = config.without_progress();
    }

    config.validate()?;
    Ok(config)
}

/// Set up structured logging
pub fn setup_logging(config: &Config, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = config.logging.level.as_str();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("spectro_ingest={}", log_level)));

    if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .ok();
    }

    debug!("Logging initialized at level: {}", log_level);
    info!(
        "Using {} workers (progress bars {})",
        config.processing.workers,
        if config.processing.show_progress { "on" } else { "off" }
    );
    Ok(())
}

/// Create a progress bar with appropriate styling
///
/// Hidden when progress output is disabled.
pub fn create_progress_bar(total: u64, message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} [{per_sec}] ETA: {eta}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(message.to_string());
    pb
}

/// Create a spinner for single long-running steps
pub fn create_spinner(message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) =
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Quote a CSV field when it contains separators, quotes or newlines
pub fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_success() {
        assert!(CommandSummary::default().is_success());
        let failed = CommandSummary {
            failures: 1,
            ..Default::default()
        };
        assert!(!failed.is_success());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(CommandSummary::format_duration(Duration::from_millis(250)), "250 ms");
        assert_eq!(CommandSummary::format_duration(Duration::from_millis(1500)), "1.50 s");
        assert_eq!(CommandSummary::format_duration(Duration::from_secs(125)), "2m 05s");
    }

    #[test]
    fn test_csv_escape_quoting() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_hidden_progress_bar() {
        assert!(create_progress_bar(10, "x", false).is_hidden());
    }
}
