use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use faultgate_core::BoxError;
use futures::FutureExt;

use crate::FaultHandler;

/// Fault interception as an `axum::middleware::from_fn` function
///
/// ```ignore
/// let handler = Arc::new(handler);
/// let app = Router::new()
///     .route("/orders/{id}", get(get_order))
///     .layer(axum::middleware::from_fn(move |req: Request, next: Next| {
///         fault_interception_middleware(Arc::clone(&handler), req, next)
///     }));
/// ```
pub async fn fault_interception_middleware(handler: Arc<FaultHandler>, request: Request, next: Next) -> Response {
    handler
        .process(request, |request| next.run(request).map(Ok::<_, BoxError>))
        .await
}
