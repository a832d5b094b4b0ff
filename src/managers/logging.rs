//! Logging manager for one backup run
//!
//! Provides dual-file logging:
//! - Detailed log: every severity, `<timestamp>_backup-full.log`
//! - Summary log: INFO and above, `<timestamp>_backup.log` (emailed on failure)
//!
//! Optionally mirrors events to the console (INFO, or `RUST_LOG` when set).

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

pub const DETAILED_SUFFIX: &str = "_backup-full.log";
pub const SUMMARY_SUFFIX: &str = "_backup.log";

const FILE_STAMP_FORMAT: &str = "%y%m%d-%H%M%S";
const LINE_STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Logging context for a single run
///
/// Holds the paths of both log files. Created once at startup and handed to
/// the backup manager, which reports the paths in its run summary.
pub struct LogSession {
    detailed_path: PathBuf,
    summary_path: PathBuf,
    _scope: Option<DefaultGuard>,
}

impl LogSession {
    /// Initialize file logging as the process-wide subscriber
    pub fn init(log_dir: &Path, console: bool) -> Result<Self> {
        let files = LogFiles::create(log_dir, &Local::now())?;
        let (detailed_path, summary_path) = (files.detailed_path.clone(), files.summary_path.clone());

        let console_layer = console.then(|| {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .with_filter(console_filter())
        });

        tracing_subscriber::registry()
            .with(files.into_layers())
            .with(console_layer)
            .try_init()
            .context("Failed to install log subscriber")?;

        Ok(Self {
            detailed_path,
            summary_path,
            _scope: None,
        })
    }

    /// Initialize file logging for the current thread only
    ///
    /// Logging reverts to the previous subscriber when the session is dropped.
    pub fn scoped(log_dir: &Path) -> Result<Self> {
        Self::scoped_at(log_dir, &Local::now())
    }

    fn scoped_at(log_dir: &Path, now: &DateTime<Local>) -> Result<Self> {
        let files = LogFiles::create(log_dir, now)?;
        let (detailed_path, summary_path) = (files.detailed_path.clone(), files.summary_path.clone());

        let subscriber = tracing_subscriber::registry().with(files.into_layers());
        let guard = tracing::subscriber::set_default(subscriber);

        Ok(Self {
            detailed_path,
            summary_path,
            _scope: Some(guard),
        })
    }

    pub fn detailed_path(&self) -> &Path {
        &self.detailed_path
    }

    pub fn summary_path(&self) -> &Path {
        &self.summary_path
    }
}

/// The two open log files of a run
struct LogFiles {
    detailed_path: PathBuf,
    summary_path: PathBuf,
    detailed: File,
    summary: File,
}

impl LogFiles {
    fn create(log_dir: &Path, now: &DateTime<Local>) -> Result<Self> {
        ensure_log_dir(log_dir)?;

        let (detailed_name, summary_name) = log_file_names(now);
        let detailed_path = log_dir.join(detailed_name);
        let summary_path = log_dir.join(summary_name);

        let detailed = File::create(&detailed_path)
            .with_context(|| format!("Failed to create log file: {:?}", detailed_path))?;
        // Detailed log is overwritten, summary log is appended
        let summary = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&summary_path)
            .with_context(|| format!("Failed to create log file: {:?}", summary_path))?;

        Ok(Self {
            detailed_path,
            summary_path,
            detailed,
            summary,
        })
    }

    /// One layer per file; writes go straight to the file so the summary is
    /// complete as soon as an event returns
    fn into_layers<S>(self) -> Vec<Box<dyn Layer<S> + Send + Sync>>
    where
        S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    {
        let detailed_layer = fmt::layer()
            .with_writer(Arc::new(self.detailed))
            .with_ansi(false)
            .event_format(LineFormat)
            .with_filter(LevelFilter::TRACE)
            .boxed();

        let summary_layer = fmt::layer()
            .with_writer(Arc::new(self.summary))
            .with_ansi(false)
            .event_format(LineFormat)
            .with_filter(LevelFilter::INFO)
            .boxed();

        vec![detailed_layer, summary_layer]
    }
}

/// Line format: `2026-10-17 02:00:01,123 - INFO     message`
struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        write!(
            writer,
            "{} - {:<8} ",
            Local::now().format(LINE_STAMP_FORMAT),
            level_label(event.metadata().level())
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn level_label(level: &Level) -> &'static str {
    match *level {
        Level::WARN => "WARNING",
        _ => level.as_str(),
    }
}

/// Detailed and summary file names for a run started at `now`
pub fn log_file_names(now: &DateTime<Local>) -> (String, String) {
    let stamp = now.format(FILE_STAMP_FORMAT);
    (
        format!("{}{}", stamp, DETAILED_SUFFIX),
        format!("{}{}", stamp, SUMMARY_SUFFIX),
    )
}

/// Create the log directory if missing
///
/// Logging is not available yet, so creation is reported on stderr.
fn ensure_log_dir(log_dir: &Path) -> Result<()> {
    if log_dir.is_dir() {
        return Ok(());
    }

    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {:?}", log_dir))?;
    eprintln!("Created log directory {}", log_dir.display());

    Ok(())
}

/// Console filter: `RUST_LOG` if set, otherwise INFO
fn console_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
