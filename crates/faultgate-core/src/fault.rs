use std::any::Any;
use std::borrow::Cow;
use std::fmt;

/// Boxed error as produced by tower services
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Stable identifier for a kind of fault
///
/// Status mappings are keyed by this identifier rather than by the Rust type
/// of the error, so the same kind can be named from code and from config.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaultKind(Cow<'static, str>);

impl FaultKind {
    /// Downstream error that does not implement [`Fault`]
    pub const UNCLASSIFIED: Self = Self::new("unclassified");
    /// Panic caught while running downstream
    pub const PANIC: Self = Self::new("panic");
    /// Downstream work was cancelled before it could complete
    pub const CANCELLED: Self = Self::new("cancelled");

    pub const fn new(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for FaultKind {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}

impl From<String> for FaultKind {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An error that can surface from downstream request processing
///
/// The `Display` output is the fault's own descriptive text; it is shown to
/// clients only when the resolved status differs from the default status.
pub trait Fault: std::error::Error + Send + Sync + 'static {
    /// Kind used for status lookup
    fn kind(&self) -> FaultKind;

    /// Whether this fault reports cancelled work rather than a failure
    fn is_cancellation(&self) -> bool {
        false
    }
}

/// A fault type whose instances all share one kind
///
/// Lets mappings be registered by type: `mapping.insert::<NotFound>(..)`.
pub trait FaultType: Fault {
    const KIND: FaultKind;
}

/// Downstream error carrying no fault kind of its own
#[derive(Debug)]
pub struct Unclassified {
    source: BoxError,
}

impl Unclassified {
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self { source: source.into() }
    }

    pub fn into_inner(self) -> BoxError {
        self.source
    }
}

impl fmt::Display for Unclassified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.source, f)
    }
}

impl std::error::Error for Unclassified {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl Fault for Unclassified {
    fn kind(&self) -> FaultKind {
        FaultKind::UNCLASSIFIED
    }
}

impl FaultType for Unclassified {
    const KIND: FaultKind = FaultKind::UNCLASSIFIED;
}

/// Panic caught while running downstream
#[derive(Debug, Clone)]
pub struct Panicked {
    message: String,
}

impl Panicked {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build from a payload returned by `catch_unwind`
    pub fn from_payload(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_owned());

        Self { message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Panicked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler panicked: {}", self.message)
    }
}

impl std::error::Error for Panicked {}

impl Fault for Panicked {
    fn kind(&self) -> FaultKind {
        FaultKind::PANIC
    }
}

impl FaultType for Panicked {
    const KIND: FaultKind = FaultKind::PANIC;
}

/// Downstream work abandoned because of a cancellation signal
#[derive(Debug, Clone, Default)]
pub struct Cancelled {
    reason: Option<String>,
}

impl Cancelled {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }
}

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "operation cancelled: {reason}"),
            None => f.write_str("operation cancelled"),
        }
    }
}

impl std::error::Error for Cancelled {}

impl Fault for Cancelled {
    fn kind(&self) -> FaultKind {
        FaultKind::CANCELLED
    }

    fn is_cancellation(&self) -> bool {
        true
    }
}

impl FaultType for Cancelled {
    const KIND: FaultKind = FaultKind::CANCELLED;
}
