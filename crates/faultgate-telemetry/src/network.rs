use std::collections::HashMap;

use faultgate_config::NetworkSinkOptions;
use opentelemetry::KeyValue;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::{LogExporter, WithExportConfig, WithHttpConfig};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_semantic_conventions::resource as semconv;
use secrecy::ExposeSecret;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::{LevelFilter, Targets};
use url::Url;

use crate::BoxedLayer;

/// Seq's OTLP/HTTP log ingestion path, relative to the server URL
const LOGS_PATH: &str = "ingest/otlp/v1/logs";

const API_KEY_HEADER: &str = "X-Seq-ApiKey";

/// Exporter internals that must never feed back into the exporter
const EXPORTER_TARGETS: &[&str] = &["opentelemetry", "opentelemetry_sdk", "opentelemetry_otlp", "reqwest", "hyper", "h2"];

pub(crate) fn logs_endpoint(server_url: &Url) -> String {
    format!("{}/{LOGS_PATH}", server_url.as_str().trim_end_matches('/'))
}

/// Headers sent with every export; empty means unauthenticated
pub(crate) fn collector_headers(options: &NetworkSinkOptions) -> HashMap<String, String> {
    options
        .api_key
        .as_ref()
        .map(ExposeSecret::expose_secret)
        .filter(|key| !key.is_empty())
        .map(|key| HashMap::from([(API_KEY_HEADER.to_owned(), key.to_owned())]))
        .unwrap_or_default()
}

fn build_resource(application_name: &str) -> Resource {
    Resource::builder()
        .with_attributes([KeyValue::new(semconv::SERVICE_NAME, application_name.to_owned())])
        .build()
}

/// OTLP logger provider exporting to the configured collector
///
/// Records are batched and sent from a background worker; the collector is
/// not contacted until the first batch is due.
pub(crate) fn logger_provider(options: &NetworkSinkOptions, application_name: &str) -> anyhow::Result<SdkLoggerProvider> {
    let headers = collector_headers(options);

    let mut builder = LogExporter::builder()
        .with_http()
        .with_endpoint(logs_endpoint(&options.server_url));

    if !headers.is_empty() {
        builder = builder.with_headers(headers);
    }

    let exporter = builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build OTLP log exporter: {e}"))?;

    let provider = SdkLoggerProvider::builder()
        .with_resource(build_resource(application_name))
        .with_batch_exporter(exporter)
        .build();

    Ok(provider)
}

/// Layer bridging `tracing` events into the logger provider
pub(crate) fn layer(provider: &SdkLoggerProvider, level: LevelFilter) -> BoxedLayer {
    let targets = EXPORTER_TARGETS
        .iter()
        .fold(Targets::new().with_default(level), |targets, target| {
            targets.with_target(*target, LevelFilter::OFF)
        });

    OpenTelemetryTracingBridge::new(provider).with_filter(targets).boxed()
}
