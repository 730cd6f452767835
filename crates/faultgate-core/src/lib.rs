//! Core types for fault translation
//!
//! Defines what a fault is, how fault kinds are identified, and how a kind
//! resolves to the status code and message a client gets to see.

#![allow(clippy::must_use_candidate)]

mod body;
mod error;
mod fault;
mod mapper;

pub use body::ErrorResponseBody;
pub use error::MapperError;
pub use fault::{BoxError, Cancelled, Fault, FaultKind, FaultType, Panicked, Unclassified};
pub use mapper::{MapperDefaults, StatusMapper, StatusMapperBuilder, StatusMapping, Translation};

/// Default status returned for faults with no registered mapping
pub const DEFAULT_STATUS_CODE: http::StatusCode = http::StatusCode::INTERNAL_SERVER_ERROR;

/// Default message returned whenever the resolved status equals the default status
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong.";
