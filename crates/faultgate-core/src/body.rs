use http::StatusCode;
use serde::{Deserialize, Serialize};

/// JSON body written for every handled fault
///
/// Serializes to exactly `{"error": ..., "statusCode": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorResponseBody {
    /// Client-visible message
    pub error: String,
    /// Numeric HTTP status, repeated in the body
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl ErrorResponseBody {
    pub fn new(error: impl Into<String>, status: StatusCode) -> Self {
        Self {
            error: error.into(),
            status_code: status.as_u16(),
        }
    }
}
