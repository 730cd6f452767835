use thiserror::Error;

/// Errors raised while building a status mapper
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapperError {
    /// A mapping entry carries a code outside the HTTP status range
    #[error("invalid status code {code} for fault kind `{kind}`")]
    InvalidStatusCode { kind: String, code: u16 },

    /// The configured default status is outside the HTTP status range
    #[error("invalid default status code {0}")]
    InvalidDefaultStatusCode(u16),
}
