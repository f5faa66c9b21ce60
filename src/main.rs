//! Photo Importer - Event-based photo import tool
//!
//! A CLI tool that scans a photo directory, groups the photos into
//! events by the time gaps between shots, then lists, copies or moves
//! the photos of the selected events.

use anyhow::Result;
use clap::Parser;
use photo_importer::{
    Action, Cli, Config, EventSummary, EventTimeline, FileResult, TransferStatus, collect_photos,
    segment, transfer_events,
};
use tracing::{Level, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

// CLI Output Module
mod cli_output {
    //! Color and format helpers for command line output

    use crossterm::{
        ExecutableCommand,
        style::{Color, Print, Stylize, style},
    };
    use std::io::stdout;

    /// CLI theme colors
    pub struct CliTheme;

    impl CliTheme {
        /// Success color (green)
        pub const SUCCESS: Color = Color::Green;
        /// Warning color (yellow)
        pub const WARNING: Color = Color::Yellow;
        /// Error color (red)
        pub const ERROR: Color = Color::Red;
        /// Hint color (dark grey)
        pub const HINT: Color = Color::DarkGrey;
        /// Accent color (cyan)
        pub const ACCENT: Color = Color::Cyan;
    }

    /// Print a separator line
    pub fn print_separator() {
        let _ = stdout().execute(Print(&format!("{}\n", "─".repeat(60))));
    }

    /// Print one event line with photo count and time span
    pub fn print_event(event_id: u32, count_label: &str, span: &str) {
        let id_styled = style(format!("Event {}", event_id))
            .with(CliTheme::ACCENT)
            .bold();
        let count_styled = style(format!("({})", count_label)).with(CliTheme::HINT);

        let _ = stdout().execute(Print("  "));
        let _ = stdout().execute(Print(id_styled));
        let _ = stdout().execute(Print(" "));
        let _ = stdout().execute(Print(count_styled));
        let _ = stdout().execute(Print(": "));
        let _ = stdout().execute(Print(span));
        let _ = stdout().execute(Print("\n"));
    }

    /// Print a warning message
    pub fn print_warning(msg: &str) {
        let _ = stdout().execute(Print(style("⚠ ").with(CliTheme::WARNING).bold()));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    /// Print an error message
    pub fn print_error(msg: &str) {
        let _ = stdout().execute(Print(style("✗ ").with(CliTheme::ERROR).bold()));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    /// Print a hint message
    pub fn print_hint(msg: &str) {
        let _ = stdout().execute(Print(style("→ ").with(CliTheme::HINT)));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    /// Print a key-value pair
    pub fn print_key_value(key: &str, value: &str, value_color: Option<Color>) {
        let key_styled = style(key).with(CliTheme::HINT);
        let value_styled = match value_color {
            Some(color) => style(value).with(color),
            None => style(value).bold(),
        };
        let _ = stdout().execute(Print("  "));
        let _ = stdout().execute(Print(key_styled));
        let _ = stdout().execute(Print(": "));
        let _ = stdout().execute(Print(value_styled));
        let _ = stdout().execute(Print("\n"));
    }

    /// Print a per-file result line
    pub fn print_result(status_icon: &str, status_color: Color, source: &str, dest_or_msg: &str) {
        let icon_styled = style(status_icon).with(status_color).bold();
        let source_styled = style(source).italic();
        let msg_styled = style(dest_or_msg).with(CliTheme::HINT);

        let _ = stdout().execute(Print("  "));
        let _ = stdout().execute(Print(icon_styled));
        let _ = stdout().execute(Print(" "));
        let _ = stdout().execute(Print(source_styled));
        let _ = stdout().execute(Print(" "));
        let _ = stdout().execute(Print(msg_styled));
        let _ = stdout().execute(Print("\n"));
    }

    /// Print an empty line
    pub fn print_blank() {
        let _ = stdout().execute(Print("\n"));
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    if cli.sample_config {
        print!("{}", Config::sample_config());
        return Ok(());
    }

    // Setup logging
    let _guard = setup_logging(&cli)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Photo Importer starting"
    );

    // Resolve the event selection before touching the file system
    let events = match cli.selected_events() {
        Ok(events) => events,
        Err(e) => {
            error!(error = %e, "Invalid event selection");
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Load configuration
    let config = load_config(&cli)?;

    if cli.verbose {
        info!(?config, "Configuration loaded");
    }

    // Validate configuration
    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if config.verbose {
        cli_output::print_hint(&format!(
            "Duration of each event is set to {} hour(s)",
            config.gap_hours
        ));
        cli_output::print_blank();
    }

    match run(&cli, &config, &events) {
        Ok(failed_count) => {
            if failed_count > 0 {
                std::process::exit(1);
            }
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Processing failed");
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Scan the source directory and run the selected action.
/// Returns the number of files that failed to transfer.
fn run(cli: &Cli, config: &Config, events: &[u32]) -> Result<usize> {
    info!(source = %config.source_dir.display(), "Scanning for photos");
    let photos = collect_photos(&config.source_dir, &config.extensions)?;
    info!(count = photos.len(), "Photos collected");

    let timeline = segment(photos, config.gap_hours)?;
    info!(
        photos = timeline.len(),
        events = timeline.max_event_id(),
        "Events segmented"
    );

    match cli.action() {
        Action::Display => {
            display_events(&timeline, events);
            Ok(0)
        }
        Action::Transfer(operation) => {
            let results = transfer_events(
                &timeline,
                events,
                operation,
                &config.dest_dir,
                config.dry_run,
            );
            Ok(report_transfer(&results, config))
        }
    }
}

/// Print one line per selected event
fn display_events(timeline: &EventTimeline, events: &[u32]) {
    use cli_output::*;

    for &event_id in events {
        match EventSummary::for_event(timeline, event_id) {
            Some(summary) => {
                print_event(summary.event_id, &summary.count_label(), &summary.span());
            }
            None => {
                warn!(
                    event = event_id,
                    max_event = timeline.max_event_id(),
                    "Requested event has no photos"
                );
            }
        }
    }
}

/// Print transfer results and return the number of failed files
fn report_transfer(results: &[FileResult], config: &Config) -> usize {
    use cli_output::*;

    // Print detailed results if verbose or dry run
    if config.verbose || config.dry_run {
        for result in results {
            match result.status {
                TransferStatus::Success => {
                    print_result(
                        "✓",
                        CliTheme::SUCCESS,
                        &result.source.display().to_string(),
                        &format!("→ {}", result.destination.display()),
                    );
                }
                TransferStatus::DryRun => {
                    print_result(
                        "~",
                        CliTheme::ACCENT,
                        &result.source.display().to_string(),
                        &format!("→ {}", result.destination.display()),
                    );
                }
                TransferStatus::Failed => {
                    let error_msg = result.error.as_deref().unwrap_or("unknown error");
                    print_result(
                        "✗",
                        CliTheme::ERROR,
                        &result.source.display().to_string(),
                        error_msg,
                    );
                }
            }
        }
    }

    // Report failed files summary
    let failed_items: Vec<_> = results
        .iter()
        .filter(|r| r.status == TransferStatus::Failed)
        .collect();

    if !failed_items.is_empty() {
        print_separator();
        print_error(&format!(
            "Failed to transfer {} file(s)",
            failed_items.len()
        ));
        print_blank();
        for result in &failed_items {
            let error_msg = result.error.as_deref().unwrap_or("unknown error");
            print_key_value(
                &result.source.display().to_string(),
                error_msg,
                Some(CliTheme::ERROR),
            );
        }
    }

    if config.dry_run {
        print_separator();
        print_warning("Dry run - no files were actually modified");
    }

    let succeeded = results
        .iter()
        .filter(|r| r.status == TransferStatus::Success)
        .count();
    info!(
        succeeded,
        failed = failed_items.len(),
        "Transfer complete"
    );

    failed_items.len()
}

/// Load configuration from file or CLI arguments
fn load_config(cli: &Cli) -> Result<Config> {
    let config = if let Some(ref config_path) = cli.config {
        info!(config_file = %config_path.display(), "Loading configuration from file");
        let file_config = Config::load_from_file(config_path)?;
        cli.merge_with_config(file_config)
    } else {
        cli.to_config()
    };

    Ok(config)
}

/// Setup logging (stderr, plus a log file when requested)
fn setup_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if let Some(ref log_path) = cli.log_file {
        if let Some(parent) = log_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)?;

        let (non_blocking, guard) = tracing_appender::non_blocking(file);

        if cli.json_log {
            subscriber
                .with(
                    fmt::layer()
                        .json()
                        .with_ansi(false)
                        .with_writer(non_blocking),
                )
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        } else {
            subscriber
                .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }

        Ok(Some(guard))
    } else if cli.json_log {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
        Ok(None)
    } else {
        subscriber
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
        Ok(None)
    }
}
