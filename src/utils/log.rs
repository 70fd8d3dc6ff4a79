use std::fs::File;
use std::io::stderr;
use std::path::PathBuf;
use std::sync::{LazyLock, Mutex};

use chrono::Local;
use miette::{Context, IntoDiagnostic};
use tracing::level_filters::LevelFilter;
use tracing::{Level, debug};
use tracing_appender::non_blocking;
use tracing_subscriber::reload;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, reload::Handle, util::SubscriberInitExt,
};

pub trait LogHandle: Send + Sync {
    fn set_filter(&self, new_filter: EnvFilter) -> miette::Result<()>;
}

impl<S> LogHandle for Handle<EnvFilter, S>
where
    S: tracing::Subscriber + Send + Sync + 'static,
{
    fn set_filter(&self, new_filter: EnvFilter) -> miette::Result<()> {
        self.modify(|current| *current = new_filter)
            .into_diagnostic()
    }
}

pub struct LogHandles {
    console_handle: Mutex<Box<dyn LogHandle>>,
    file_handle: Mutex<Box<dyn LogHandle>>,
    /// `None` when the log file could not be created.
    log_file: Option<PathBuf>,
}

fn open_log_file() -> Option<(PathBuf, File)> {
    let log_dir = std::env::temp_dir().join("bitchess_logs");
    std::fs::create_dir_all(&log_dir).ok()?;
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let path = log_dir.join(format!("bitchess_{timestamp}.log"));
    let file = File::create(&path).ok()?;
    Some((path, file))
}

static LOG_HANDLES: LazyLock<LogHandles> = LazyLock::new(|| {
    #[cfg(feature = "dev-tools")]
    color_backtrace::install();

    // Console Layer with its own reloadable filter
    let console_filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    let (console_filter, console_handle) = reload::Layer::new(console_filter);
    let console_layer = fmt::layer()
        .without_time()
        .with_writer(stderr)
        .with_filter(console_filter);

    // File Layer with its own reloadable filter (initially off)
    let file_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::OFF.into())
        .parse_lossy("");
    let (file_filter, file_handle) = reload::Layer::new(file_filter);

    let (log_file, file_layer) = match open_log_file() {
        Some((path, file)) => {
            let (non_blocking_writer, guard) = non_blocking(file);
            std::mem::forget(guard); // Keep the worker alive for the whole process.
            let layer = fmt::layer()
                .with_writer(non_blocking_writer)
                .with_ansi(false) // No colors in file
                .with_filter(file_filter);
            (Some(path), Some(layer))
        }
        None => (None, None),
    };

    // Tests may race to install a subscriber; the first one wins.
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();

    LogHandles {
        console_handle: Mutex::new(Box::new(console_handle)),
        file_handle: Mutex::new(Box::new(file_handle)),
        log_file,
    }
});

pub fn set_log_level(level: Level) -> miette::Result<()> {
    let new_filter = EnvFilter::new(level.to_string());

    LOG_HANDLES
        .console_handle
        .lock()
        .map_err(|_| miette::miette!("Console log handle poisoned"))?
        .set_filter(new_filter)
        .with_context(|| format!("Failed to modify log filter to level: {level}"))
}

pub fn toggle_file_logging(enable: bool) -> miette::Result<()> {
    if enable && LOG_HANDLES.log_file.is_none() {
        miette::bail!("No log file could be created in the temp directory");
    }
    let new_filter = if enable {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("off")
    };

    LOG_HANDLES
        .file_handle
        .lock()
        .map_err(|_| miette::miette!("File log handle poisoned"))?
        .set_filter(new_filter)
        .context("Failed to modify log filter")
}

/// Where file logging writes to, if it is available.
pub fn log_file_path() -> Option<&'static PathBuf> {
    LOG_HANDLES.log_file.as_ref()
}

/// Initialize tracing and backtrace. Safe to call more than once.
pub fn init() {
    LazyLock::force(&LOG_HANDLES);
    debug!("logging initialised");
}
