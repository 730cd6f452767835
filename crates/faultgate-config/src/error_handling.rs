use indexmap::IndexMap;
use serde::Deserialize;

/// Fault translation configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorHandlingConfig {
    /// Status used when a fault kind has no mapping
    #[serde(default = "default_status_code")]
    pub default_status_code: u16,
    /// Message shown whenever the resolved status equals the default status
    #[serde(default = "default_error_message")]
    pub default_error_message: String,
    /// Fault kind name to HTTP status code
    #[serde(default)]
    pub mappings: IndexMap<String, u16>,
    /// How cancellation faults are reported
    #[serde(default)]
    pub cancellation: CancellationPolicy,
}

impl Default for ErrorHandlingConfig {
    fn default() -> Self {
        Self {
            default_status_code: default_status_code(),
            default_error_message: default_error_message(),
            mappings: IndexMap::new(),
            cancellation: CancellationPolicy::default(),
        }
    }
}

/// Treatment of faults that report cancelled work
///
/// A dropped request future never reaches the middleware; this only covers
/// cancellation surfaced by downstream code as a fault.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancellationPolicy {
    /// Still answer the request, but log at debug instead of error
    #[default]
    Exclude,
    /// Handle exactly like any other fault
    Translate,
}

fn default_status_code() -> u16 {
    500
}

fn default_error_message() -> String {
    "Something went wrong.".to_owned()
}
