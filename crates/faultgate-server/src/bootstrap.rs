use std::sync::Arc;

use faultgate_config::Config;
use faultgate_telemetry::{Logger, LoggerGuard};

use crate::{FaultHandler, FaultInterceptionLayer};

/// Logger and fault handler wired from one [`Config`]
///
/// Holds the logger guard; keep this alive for as long as the server runs.
#[derive(Debug)]
pub struct ErrorHandling {
    handler: Arc<FaultHandler>,
    guard: LoggerGuard,
}

impl ErrorHandling {
    /// Build the logger and mapper without touching global state
    ///
    /// # Errors
    ///
    /// Returns an error if a log sink cannot be set up or a configured status
    /// code is invalid
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let (logger, guard) = faultgate_telemetry::build(&config.logging)?;
        let handler = FaultHandler::from_config(&config.error_handling, logger)?;

        tracing::debug!(
            mappings = handler.mapper().mapping().len(),
            default_status = handler.mapper().default_status_code().as_u16(),
            "fault handling configured"
        );

        Ok(Self {
            handler: Arc::new(handler),
            guard,
        })
    }

    /// Layer sharing this handler; cheap to call repeatedly
    pub fn layer(&self) -> FaultInterceptionLayer {
        FaultInterceptionLayer::from_shared(Arc::clone(&self.handler))
    }

    pub fn handler(&self) -> Arc<FaultHandler> {
        Arc::clone(&self.handler)
    }

    pub fn logger(&self) -> &Logger {
        self.handler.logger()
    }

    /// Make the configured logger the process-wide default as well
    ///
    /// # Errors
    ///
    /// Returns an error if a global logger is already installed
    pub fn install_global_logger(&self) -> anyhow::Result<()> {
        self.handler.logger().install()
    }

    /// Flush buffered records without closing the sinks
    ///
    /// # Errors
    ///
    /// Returns an error if the network sink fails to flush
    pub fn flush(&self) -> anyhow::Result<()> {
        self.guard.force_flush()
    }
}

#[cfg(test)]
mod tests {
    use faultgate_config::LogLevel;
    use http::StatusCode;

    use super::*;
    use crate::test_support::KindA;

    #[test]
    fn defaults_give_disabled_logger() {
        let errors = ErrorHandling::from_config(&Config::default()).unwrap();

        assert!(!errors.logger().enabled(LogLevel::Error));
        assert_eq!(errors.handler().mapper().default_status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(errors.flush().is_ok());
    }

    #[test]
    fn mappings_from_toml() {
        let config = Config::from_toml(
            r#"
            [error_handling]
            default_error_message = "Try again later."

            [error_handling.mappings]
            kind_a = 404
            "#,
        )
        .unwrap();

        let errors = ErrorHandling::from_config(&config).unwrap();
        let mapper = errors.layer().handler().mapper().clone();

        assert_eq!(mapper.map(&KindA("gone")), (StatusCode::NOT_FOUND, true));
        assert_eq!(mapper.default_error_message(), "Try again later.");
    }
}
