use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::response::Response;
use faultgate_core::BoxError;
use futures::TryFutureExt;
use futures::future::BoxFuture;
use http::Request;
use tower::{Layer, Service, ServiceExt};

use crate::FaultHandler;

/// Tower layer applying fault interception to an inner service
///
/// The wrapped service never fails: inner errors, raised faults and panics
/// all come back as error responses.
///
/// Only a [`Raise`](crate::Raise) error keeps its fault kind. Any other
/// inner error, including a [`Fault`](faultgate_core::Fault) returned bare,
/// is logged as `unclassified` and gets the default status. Services whose
/// error type is a fault should wrap it first:
///
/// ```ignore
/// let service = ServiceBuilder::new()
///     .layer(fault_layer)
///     .service(orders_service.map_err(Raise::new));
/// ```
#[derive(Debug, Clone)]
pub struct FaultInterceptionLayer {
    handler: Arc<FaultHandler>,
}

impl FaultInterceptionLayer {
    pub fn new(handler: FaultHandler) -> Self {
        Self::from_shared(Arc::new(handler))
    }

    pub const fn from_shared(handler: Arc<FaultHandler>) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &FaultHandler {
        &self.handler
    }
}

impl<S> Layer<S> for FaultInterceptionLayer {
    type Service = FaultInterception<S>;

    fn layer(&self, inner: S) -> Self::Service {
        FaultInterception {
            inner,
            handler: Arc::clone(&self.handler),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FaultInterception<S> {
    inner: S,
    handler: Arc<FaultHandler>,
}

impl<S, B> Service<Request<B>> for FaultInterception<S>
where
    S: Service<Request<B>, Response = Response> + Clone + Send + 'static,
    S::Error: Into<BoxError>,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // the inner service is driven to readiness per request so its
        // readiness errors are translated as well
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        let inner = self.inner.clone();
        let handler = Arc::clone(&self.handler);

        Box::pin(async move {
            let response = handler
                .process(request, |request| inner.oneshot(request).map_err(Into::<BoxError>::into))
                .await;
            Ok(response)
        })
    }
}
