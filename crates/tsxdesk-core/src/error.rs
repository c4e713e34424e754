use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Input validation errors exposed by `tsxdesk-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker '{value}' must not contain whitespace")]
    TickerContainsWhitespace { value: String },
}

/// Transport or HTTP status failure on an outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkError {
    message: String,
    status: Option<u16>,
}

impl NetworkError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn status(status: u16, url: &str) -> Self {
        Self {
            message: format!("GET {url} returned status {status}"),
            status: Some(status),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status when the server answered with a non-2xx code.
    pub const fn http_status(&self) -> Option<u16> {
        self.status
    }
}

impl Display for NetworkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for NetworkError {}

/// Provider-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// The provider could not be reached.
    Unavailable,
    /// The provider answered with a non-success status.
    Upstream,
    /// The provider answered with a body we could not decode.
    Malformed,
    /// The cookie/crumb handshake failed.
    Session,
}

/// Failure of a market-data provider lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    kind: ProviderErrorKind,
    message: String,
}

impl ProviderError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Unavailable, message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Upstream, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Malformed, message)
    }

    pub fn session(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Session, message)
    }

    fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ProviderErrorKind::Unavailable => "provider.unavailable",
            ProviderErrorKind::Upstream => "provider.upstream",
            ProviderErrorKind::Malformed => "provider.malformed",
            ProviderErrorKind::Session => "provider.session",
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for ProviderError {}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rust_xlsxwriter::XlsxError> for CoreError {
    fn from(error: rust_xlsxwriter::XlsxError) -> Self {
        Self::Io(std::io::Error::other(error.to_string()))
    }
}
