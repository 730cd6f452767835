use std::borrow::Cow;
use std::collections::HashMap;

use http::StatusCode;

use crate::{DEFAULT_ERROR_MESSAGE, DEFAULT_STATUS_CODE, ErrorResponseBody, Fault, FaultKind, FaultType, MapperError};

/// Table from fault kind to HTTP status
///
/// Inserting a kind twice keeps the last status.
#[derive(Debug, Clone, Default)]
pub struct StatusMapping {
    entries: HashMap<FaultKind, StatusCode>,
}

impl StatusMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a status for every fault of type `T`
    pub fn insert<T: FaultType>(&mut self, status: StatusCode) -> &mut Self {
        self.insert_kind(T::KIND, status)
    }

    /// Register a status for a kind
    pub fn insert_kind(&mut self, kind: impl Into<FaultKind>, status: StatusCode) -> &mut Self {
        self.entries.insert(kind.into(), status);
        self
    }

    pub fn get(&self, kind: &FaultKind) -> Option<StatusCode> {
        self.entries.get(kind).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FaultKind, StatusCode)> {
        self.entries.iter().map(|(kind, status)| (kind, *status))
    }
}

/// Status and message used for unmapped faults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperDefaults {
    status_code: StatusCode,
    error_message: Cow<'static, str>,
}

impl MapperDefaults {
    pub fn new(status_code: StatusCode, error_message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status_code,
            error_message: error_message.into(),
        }
    }

    /// Build from a raw numeric status
    ///
    /// # Errors
    ///
    /// Returns an error if `code` is not a valid HTTP status
    pub fn from_code(code: u16, error_message: impl Into<Cow<'static, str>>) -> Result<Self, MapperError> {
        let status_code = StatusCode::from_u16(code).map_err(|_| MapperError::InvalidDefaultStatusCode(code))?;
        Ok(Self::new(status_code, error_message))
    }

    pub const fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }
}

impl Default for MapperDefaults {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_CODE, DEFAULT_ERROR_MESSAGE)
    }
}

/// Outcome of translating one fault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Status written on the response
    pub status: StatusCode,
    /// Whether the fault kind had a registered mapping
    pub mapped: bool,
    /// Message shown to the client
    pub message: String,
}

impl Translation {
    pub fn body(&self) -> ErrorResponseBody {
        ErrorResponseBody::new(self.message.clone(), self.status)
    }
}

/// Read-only fault to status translator
///
/// Built once at startup and shared between requests.
#[derive(Debug, Clone, Default)]
pub struct StatusMapper {
    mapping: StatusMapping,
    defaults: MapperDefaults,
}

impl StatusMapper {
    pub const fn new(mapping: StatusMapping, defaults: MapperDefaults) -> Self {
        Self { mapping, defaults }
    }

    /// Build a mapper by letting the caller populate the mapping
    pub fn configure(configure: impl FnOnce(&mut StatusMapping), defaults: MapperDefaults) -> Self {
        let mut mapping = StatusMapping::new();
        configure(&mut mapping);
        Self::new(mapping, defaults)
    }

    pub fn builder() -> StatusMapperBuilder {
        StatusMapperBuilder::default()
    }

    /// Build a mapper from raw numeric codes, typically read from config
    ///
    /// # Errors
    ///
    /// Returns an error if any code is not a valid HTTP status
    pub fn from_codes<I, K>(codes: I, defaults: MapperDefaults) -> Result<Self, MapperError>
    where
        I: IntoIterator<Item = (K, u16)>,
        K: Into<FaultKind>,
    {
        let mut mapping = StatusMapping::new();

        for (kind, code) in codes {
            let kind = kind.into();
            let status = StatusCode::from_u16(code).map_err(|_| MapperError::InvalidStatusCode {
                kind: kind.to_string(),
                code,
            })?;
            mapping.insert_kind(kind, status);
        }

        Ok(Self::new(mapping, defaults))
    }

    /// Look up the status for a fault by its exact kind
    ///
    /// Returns the status and whether the kind was registered. Unknown kinds
    /// fall through to the default status.
    pub fn map(&self, fault: &dyn Fault) -> (StatusCode, bool) {
        self.mapping
            .get(&fault.kind())
            .map_or((self.defaults.status_code, false), |status| (status, true))
    }

    /// Pick the message shown to the client
    ///
    /// Compares the status value with the default status, not the lookup
    /// outcome: a kind explicitly mapped to the default status still gets the
    /// generic message.
    pub fn resolve_message(&self, fault: &dyn Fault, status: StatusCode) -> Cow<'_, str> {
        if status == self.defaults.status_code {
            Cow::Borrowed(self.defaults.error_message())
        } else {
            Cow::Owned(fault.to_string())
        }
    }

    pub fn translate(&self, fault: &dyn Fault) -> Translation {
        let (status, mapped) = self.map(fault);
        let message = self.resolve_message(fault, status).into_owned();

        Translation { status, mapped, message }
    }

    pub const fn default_status_code(&self) -> StatusCode {
        self.defaults.status_code
    }

    pub fn default_error_message(&self) -> &str {
        self.defaults.error_message()
    }

    pub const fn mapping(&self) -> &StatusMapping {
        &self.mapping
    }
}

/// Fluent builder for [`StatusMapper`]
#[derive(Debug, Default)]
pub struct StatusMapperBuilder {
    mapping: StatusMapping,
    defaults: MapperDefaults,
}

impl StatusMapperBuilder {
    #[must_use]
    pub fn map<T: FaultType>(mut self, status: StatusCode) -> Self {
        self.mapping.insert::<T>(status);
        self
    }

    #[must_use]
    pub fn map_kind(mut self, kind: impl Into<FaultKind>, status: StatusCode) -> Self {
        self.mapping.insert_kind(kind, status);
        self
    }

    #[must_use]
    pub fn default_status_code(mut self, status: StatusCode) -> Self {
        self.defaults.status_code = status;
        self
    }

    #[must_use]
    pub fn default_error_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.defaults.error_message = message.into();
        self
    }

    pub fn build(self) -> StatusMapper {
        StatusMapper::new(self.mapping, self.defaults)
    }
}
