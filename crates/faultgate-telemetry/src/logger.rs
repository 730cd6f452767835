use faultgate_config::LogLevel;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use tracing::{Dispatch, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;

/// Handle to the process logger
///
/// Cheap to clone and safe to use from any number of concurrent requests.
/// Events emitted inside [`Logger::in_scope`] go to this logger's sinks,
/// whether or not it was installed as the global default.
#[derive(Debug, Clone)]
pub struct Logger {
    dispatch: Dispatch,
}

impl Logger {
    pub const fn new(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }

    /// Logger that drops every event
    pub fn disabled() -> Self {
        Self::new(Dispatch::new(tracing_subscriber::registry().with(LevelFilter::OFF)))
    }

    /// Run `f` with this logger as the current dispatcher
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Whether an event at `level` would reach any sink
    ///
    /// `tracing` cannot emit above error, so `Fatal` is never enabled.
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.in_scope(|| match level {
            LogLevel::Verbose => tracing::enabled!(Level::TRACE),
            LogLevel::Debug => tracing::enabled!(Level::DEBUG),
            LogLevel::Information => tracing::enabled!(Level::INFO),
            LogLevel::Warning => tracing::enabled!(Level::WARN),
            LogLevel::Error => tracing::enabled!(Level::ERROR),
            LogLevel::Fatal => false,
        })
    }

    /// Install as the process-wide default, replacing the no-op default
    ///
    /// # Errors
    ///
    /// Returns an error if a global default has already been set
    pub fn install(&self) -> anyhow::Result<()> {
        tracing::dispatcher::set_global_default(self.dispatch.clone())
            .map_err(|e| anyhow::anyhow!("failed to install global logger: {e}"))
    }

    pub const fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }
}

/// Keeps the sinks alive; flushes and closes them on drop
#[derive(Debug, Default)]
#[must_use = "dropping the guard closes the log sinks"]
pub struct LoggerGuard {
    pub(crate) file_worker: Option<WorkerGuard>,
    pub(crate) logger_provider: Option<SdkLoggerProvider>,
}

impl LoggerGuard {
    /// Whether no sink is attached
    pub const fn is_empty(&self) -> bool {
        self.file_worker.is_none() && self.logger_provider.is_none()
    }

    /// Push buffered records to the network collector
    ///
    /// # Errors
    ///
    /// Returns an error if the logger provider fails to flush
    pub fn force_flush(&self) -> anyhow::Result<()> {
        if let Some(ref provider) = self.logger_provider {
            provider
                .force_flush()
                .map_err(|e| anyhow::anyhow!("failed to flush logs: {e}"))?;
        }
        Ok(())
    }
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.logger_provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("failed to shutdown logger provider: {e}");
        }
        drop(self.file_worker.take());
    }
}
