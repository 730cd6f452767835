use std::fmt;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use faultgate_core::Fault;
use http::StatusCode;

/// Carries a fault from a handler to the fault interception middleware
///
/// Any [`Fault`] converts into a `Raise`, so handlers can use `?`:
///
/// ```ignore
/// async fn get_order(Path(id): Path<u64>) -> Result<Json<Order>, Raise> {
///     let order = orders.find(id).ok_or(OrderNotFound(id))?;
///     Ok(Json(order))
/// }
/// ```
///
/// As a response it is a bare 500 carrying the fault in its extensions; the
/// middleware replaces it with the translated error response.
#[derive(Clone)]
pub struct Raise(Arc<dyn Fault>);

impl Raise {
    pub fn new(fault: impl Fault) -> Self {
        Self(Arc::new(fault))
    }

    pub fn fault(&self) -> &dyn Fault {
        self.0.as_ref()
    }

    pub fn into_fault(self) -> Arc<dyn Fault> {
        self.0
    }
}

impl<F: Fault> From<F> for Raise {
    fn from(fault: F) -> Self {
        Self::new(fault)
    }
}

impl fmt::Debug for Raise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Raise").field(&self.0).finish()
    }
}

impl fmt::Display for Raise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Raise {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl IntoResponse for Raise {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(self);
        response
    }
}
