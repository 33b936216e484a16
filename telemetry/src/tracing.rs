use std::sync::Once;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the directory that receives log files.
const LOG_DIR_ENV_NAME: &str = "SYNC_LOG_DIR";

/// Directory that receives log files when no override is set.
const DEFAULT_LOG_DIR: &str = "logs";

/// Errors raised while installing the tracing stack.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The global subscriber was already set.
    #[error("failed to install the tracing subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Initializes tracing with a daily-rolling file appender and a stdout layer.
///
/// Log lines are timestamped and leveled. The file layer writes to
/// `{SYNC_LOG_DIR|logs}/{process_name}.log.*` through a non-blocking writer;
/// the returned [`WorkerGuard`] must be kept alive for the whole run so
/// buffered lines are flushed on exit. Filtering honors `RUST_LOG` and
/// defaults to `info`. Records emitted through the `log` crate are bridged
/// into the same subscriber.
pub fn init_tracing(process_name: &str) -> Result<WorkerGuard, TelemetryError> {
    let log_dir =
        std::env::var(LOG_DIR_ENV_NAME).unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string());
    let file_appender = tracing_appender::rolling::daily(log_dir, format!("{process_name}.log"));
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false);
    let stdout_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init()?;

    Ok(guard)
}

/// Initializes a test-friendly subscriber exactly once per process.
///
/// Output goes through the libtest capture writer, so passing tests stay
/// quiet. Safe to call from every test.
pub fn init_test_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_test_writer()
            .init();
    });
}
