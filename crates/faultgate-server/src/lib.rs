//! Fault interception middleware
//!
//! Wraps downstream request handling, turns any fault that escapes it into a
//! JSON error response, and logs the full fault through the injected
//! [`Logger`](faultgate_telemetry::Logger).
//!
//! Faults reach the middleware in three ways:
//! - an inner tower service returns `Err`
//! - a handler returns a [`Raise`]
//! - downstream code panics

#![allow(clippy::must_use_candidate)]

mod bootstrap;
mod handler;
mod layer;
mod middleware;
mod raise;

#[cfg(test)]
mod test_support;

pub use bootstrap::ErrorHandling;
pub use handler::{FaultHandler, RequestSummary};
pub use layer::{FaultInterception, FaultInterceptionLayer};
pub use middleware::fault_interception_middleware;
pub use raise::Raise;
