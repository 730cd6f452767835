//! Logging setup for faultgate
//!
//! Turns [`LoggingOptions`] into a [`Logger`] handle backed by the requested
//! sinks: a rolling file and/or a network log collector reached over OTLP.

#![allow(clippy::must_use_candidate)]

mod file;
mod filter;
mod logger;
mod network;

use faultgate_config::LoggingOptions;
use tracing::Dispatch;
use tracing_subscriber::layer::SubscriberExt;

pub use logger::{Logger, LoggerGuard};

type BoxedLayer = Box<dyn tracing_subscriber::Layer<tracing_subscriber::Registry> + Send + Sync>;

/// Build a logger from options without installing it
///
/// With no sink enabled the returned logger discards everything. The guard
/// must be held for as long as the logger is in use; dropping it flushes
/// and closes the sinks.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or the OTLP
/// exporter cannot be built
pub fn build(options: &LoggingOptions) -> anyhow::Result<(Logger, LoggerGuard)> {
    if !options.has_any_sink() {
        return Ok((Logger::disabled(), LoggerGuard::default()));
    }

    let level = options.minimum_level.as_level_filter();
    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);
    let mut guard = LoggerGuard::default();

    if let Some(ref file_options) = options.file {
        let (layer, worker) = file::layer(file_options, level)?;
        layers.push(layer);
        guard.file_worker = Some(worker);
    }

    if let Some(ref network_options) = options.network {
        let provider = network::logger_provider(network_options, &options.application_name)?;
        layers.push(network::layer(&provider, level));
        guard.logger_provider = Some(provider);
    }

    let subscriber = tracing_subscriber::registry()
        .with(layers)
        .with(filter::env_filter(options.minimum_level));

    let logger = Logger::new(Dispatch::new(subscriber));

    logger.in_scope(|| {
        tracing::debug!(
            application = %options.application_name,
            file = options.file.is_some(),
            network = options.network.is_some(),
            "logger initialized"
        );
    });

    Ok((logger, guard))
}

/// Build a logger and install it as the process-wide default
///
/// # Errors
///
/// Returns an error if [`build`] fails or a global logger is already installed
pub fn init(options: &LoggingOptions) -> anyhow::Result<(Logger, LoggerGuard)> {
    let (logger, guard) = build(options)?;
    logger.install()?;
    Ok((logger, guard))
}

#[cfg(test)]
mod tests {
    use faultgate_config::{FileSinkOptions, LogLevel, LoggingOptions, NetworkSinkOptions, RollingInterval};

    use super::*;

    #[test]
    fn no_sink_disables_everything() {
        let options = LoggingOptions::builder()
            .with_minimum_level(LogLevel::Verbose)
            .build()
            .unwrap();

        let (logger, guard) = build(&options).unwrap();

        assert!(guard.is_empty());
        assert!(!logger.enabled(LogLevel::Error));
        assert!(!logger.enabled(LogLevel::Verbose));
    }

    #[test]
    fn file_sink_writes_at_minimum_level() {
        let dir = tempfile::tempdir().unwrap();
        let options = LoggingOptions::builder()
            .with_file(FileSinkOptions::new(dir.path().join("app-.log")).rolling(RollingInterval::Never))
            .with_minimum_level(LogLevel::Warning)
            .build()
            .unwrap();

        let (logger, guard) = build(&options).unwrap();

        assert!(logger.enabled(LogLevel::Error));
        assert!(!logger.enabled(LogLevel::Information));

        logger.in_scope(|| {
            tracing::info!("below threshold");
            tracing::error!(fault.kind = "kind_a", "order 42 exploded");
        });
        drop(guard);

        let written = std::fs::read_to_string(dir.path().join("app.log")).unwrap();
        assert!(written.contains("order 42 exploded"));
        assert!(written.contains("kind_a"));
        assert!(!written.contains("below threshold"));
    }

    #[test]
    fn fatal_threshold_keeps_errors_out_of_file() {
        let dir = tempfile::tempdir().unwrap();
        let options = LoggingOptions::builder()
            .with_file(FileSinkOptions::new(dir.path().join("app-.log")).rolling(RollingInterval::Never))
            .with_minimum_level(LogLevel::Fatal)
            .build()
            .unwrap();

        let (logger, guard) = build(&options).unwrap();

        assert!(!logger.enabled(LogLevel::Error));
        assert!(!logger.enabled(LogLevel::Fatal));

        logger.in_scope(|| {
            tracing::error!(fault.kind = "kind_b", "ledger offset 17 corrupt");
        });
        drop(guard);

        let written = std::fs::read_to_string(dir.path().join("app.log")).unwrap_or_default();
        assert!(written.is_empty());
    }

    #[test]
    fn network_sink_builds_without_contacting_collector() {
        let options = LoggingOptions::builder()
            .with_network(NetworkSinkOptions::default())
            .with_application_name("faultgate-test")
            .build()
            .unwrap();

        let (logger, guard) = build(&options).unwrap();

        assert!(!guard.is_empty());
        assert!(logger.enabled(LogLevel::Information));
        assert!(!logger.enabled(LogLevel::Debug));
    }
}
