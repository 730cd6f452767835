use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use axum::Json;
use axum::response::{IntoResponse, Response};
use faultgate_config::{CancellationPolicy, ErrorHandlingConfig};
use faultgate_core::{BoxError, Fault, MapperDefaults, Panicked, StatusMapper, Translation, Unclassified};
use faultgate_telemetry::Logger;
use futures::FutureExt;
use http::{Method, Request, Uri};

use crate::Raise;

/// Request line kept for the fault log, captured before the request is
/// handed downstream
#[derive(Debug, Clone)]
pub struct RequestSummary {
    pub method: Method,
    pub uri: Uri,
}

impl RequestSummary {
    pub fn from_request<B>(request: &Request<B>) -> Self {
        Self {
            method: request.method().clone(),
            uri: request.uri().clone(),
        }
    }
}

/// Shared state of the fault interception middleware
///
/// Holds no per-request state, so one instance serves every request.
#[derive(Debug, Clone)]
pub struct FaultHandler {
    mapper: Arc<StatusMapper>,
    logger: Logger,
    cancellation: CancellationPolicy,
}

impl FaultHandler {
    pub fn new(mapper: Arc<StatusMapper>, logger: Logger) -> Self {
        Self {
            mapper,
            logger,
            cancellation: CancellationPolicy::default(),
        }
    }

    /// Build from the `[error_handling]` config section
    ///
    /// # Errors
    ///
    /// Returns an error if the default status or any mapped status is not a
    /// valid HTTP status
    pub fn from_config(config: &ErrorHandlingConfig, logger: Logger) -> anyhow::Result<Self> {
        let defaults = MapperDefaults::from_code(config.default_status_code, config.default_error_message.clone())?;
        let mapper = StatusMapper::from_codes(
            config.mappings.iter().map(|(kind, code)| (kind.clone(), *code)),
            defaults,
        )?;

        Ok(Self::new(Arc::new(mapper), logger).with_cancellation_policy(config.cancellation))
    }

    #[must_use]
    pub fn with_cancellation_policy(mut self, policy: CancellationPolicy) -> Self {
        self.cancellation = policy;
        self
    }

    pub fn mapper(&self) -> &StatusMapper {
        &self.mapper
    }

    pub const fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Run `downstream` and translate any fault that escapes it
    ///
    /// Successful responses pass through untouched. A response carrying a
    /// [`Raise`], an `Err` from downstream, and a panic are all replaced by
    /// the JSON error response.
    pub async fn process<B, F, Fut>(&self, request: Request<B>, downstream: F) -> Response
    where
        F: FnOnce(Request<B>) -> Fut,
        Fut: Future<Output = Result<Response, BoxError>>,
    {
        let summary = RequestSummary::from_request(&request);

        let outcome = AssertUnwindSafe(async move { downstream(request).await })
            .catch_unwind()
            .await;

        let fault: Arc<dyn Fault> = match outcome {
            Ok(Ok(mut response)) => match response.extensions_mut().remove::<Raise>() {
                Some(raised) => raised.into_fault(),
                None => return response,
            },
            Ok(Err(error)) => fault_from_error(error),
            Err(payload) => Arc::new(Panicked::from_payload(payload.as_ref())),
        };

        self.handle(fault.as_ref(), &summary)
    }

    /// Log `fault` and build the error response for it
    pub fn handle(&self, fault: &dyn Fault, request: &RequestSummary) -> Response {
        let translation = self.mapper.translate(fault);
        self.log(fault, &translation, request);

        (translation.status, Json(translation.body())).into_response()
    }

    fn log(&self, fault: &dyn Fault, translation: &Translation, request: &RequestSummary) {
        let sources = source_chain(fault);
        let quiet = fault.is_cancellation() && self.cancellation == CancellationPolicy::Exclude;

        self.logger.in_scope(|| {
            if quiet {
                tracing::debug!(
                    fault.kind = %fault.kind(),
                    status = translation.status.as_u16(),
                    mapped = translation.mapped,
                    method = %request.method,
                    uri = %request.uri,
                    error = %fault,
                    detail = ?fault,
                    sources = %sources,
                    "request cancelled"
                );
            } else {
                tracing::error!(
                    fault.kind = %fault.kind(),
                    status = translation.status.as_u16(),
                    mapped = translation.mapped,
                    method = %request.method,
                    uri = %request.uri,
                    error = %fault,
                    detail = ?fault,
                    sources = %sources,
                    "unhandled fault while processing request"
                );
            }
        });
    }
}

/// Errors other than a [`Raise`] carry no kind and become [`Unclassified`]
fn fault_from_error(error: BoxError) -> Arc<dyn Fault> {
    match error.downcast::<Raise>() {
        Ok(raised) => raised.into_fault(),
        Err(error) => Arc::new(Unclassified::new(error)),
    }
}

/// Display text of every underlying cause, outermost first
fn source_chain(fault: &dyn Fault) -> String {
    let mut chain = Vec::new();
    let mut current = fault.source();

    while let Some(source) = current {
        chain.push(source.to_string());
        current = source.source();
    }

    chain.join(": ")
}
