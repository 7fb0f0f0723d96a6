//! Error handling for the forge-migrate crate.
use std::{error::Error as StdError, fmt};

use crate::forge::ForgeKind;

/// Error type for the forge-migrate crate.
#[derive(Debug)]
pub struct ForgeMigrateError {
    /// Inner error.
    inner: Box<Inner>,
}

impl ForgeMigrateError {
    /// Create a new error.
    pub(crate) fn new(kind: ForgeMigrateErrorKind) -> Self {
        Self {
            inner: Box::new(Inner {
                kind,
                forge: None,
                url: None,
                status: None,
                source: None,
            }),
        }
    }

    /// Attach a response-body snippet (or free-form detail) as the source.
    pub(crate) fn with_text(mut self, text: &str) -> Self {
        let snippet: String = text.chars().take(200).collect();
        self.inner.source = Some(Box::new(std::io::Error::other(snippet)));
        self
    }

    /// Attach the forge the error came from.
    pub(crate) fn with_forge(mut self, forge: ForgeKind) -> Self {
        self.inner.forge = Some(forge);
        self
    }

    /// Attach the URL that was attempted.
    pub(crate) fn with_url(mut self, url: &str) -> Self {
        self.inner.url = Some(url.to_string());
        self
    }

    /// Attach the HTTP status code that was returned.
    pub(crate) fn with_status(mut self, status: u16) -> Self {
        self.inner.status = Some(status);
        self
    }

    /// Error kind.
    pub fn kind(&self) -> &ForgeMigrateErrorKind {
        &self.inner.kind
    }

    /// Whether a retry may succeed (network failure, timeout, 5xx).
    pub fn is_transient(&self) -> bool {
        matches!(self.inner.kind, ForgeMigrateErrorKind::Transient)
    }

    /// Whether the repository already exists at the destination.
    pub fn is_conflict(&self) -> bool {
        matches!(self.inner.kind, ForgeMigrateErrorKind::Conflict)
    }
}

/// Type alias for a boxed error.
pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

/// Inner error type for the forge-migrate crate.
#[derive(Debug)]
struct Inner {
    /// Error kind.
    kind: ForgeMigrateErrorKind,

    /// Forge the error came from.
    forge: Option<ForgeKind>,

    /// URL that was attempted.
    url: Option<String>,

    /// HTTP status code, when the forge answered at all.
    status: Option<u16>,

    /// Source error.
    source: Option<BoxError>,
}

/// Error taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForgeMigrateErrorKind {
    /// Invalid configuration, raised before any network call.
    Config,

    /// Listing the source repositories failed; fatal for the run.
    Fetch,

    /// Undecodable response body.
    Decode,

    /// The forge rejected the credentials (401/403).
    Auth,

    /// A repository with the same name already exists at the destination.
    Conflict,

    /// Network failure, timeout or 5xx; eligible for a bounded retry.
    Transient,

    /// The forge rejected the request itself (other 4xx).
    MalformedRequest,

    /// The forge does not support the requested operation.
    Unsupported,
}

impl fmt::Display for ForgeMigrateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.inner.kind)?;
        if let Some(forge) = &self.inner.forge {
            write!(f, " [{forge}]")?;
        }
        if let Some(status) = self.inner.status {
            write!(f, " (http {status})")?;
        }
        if let Some(url) = &self.inner.url {
            write!(f, " at {url}")?;
        }
        if let Some(source) = &self.inner.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl StdError for ForgeMigrateError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source.as_ref().map(|e| &**e as _)
    }
}

impl From<reqwest::Error> for ForgeMigrateError {
    fn from(e: reqwest::Error) -> Self {
        // Transport failures and timeouts are retry-eligible.
        Self {
            inner: Box::new(Inner {
                kind: ForgeMigrateErrorKind::Transient,
                forge: None,
                url: e.url().map(|u| u.to_string()),
                status: e.status().map(|s| s.as_u16()),
                source: Some(Box::new(e)),
            }),
        }
    }
}

impl From<serde_json::Error> for ForgeMigrateError {
    fn from(e: serde_json::Error) -> Self {
        Self {
            inner: Box::new(Inner {
                kind: ForgeMigrateErrorKind::Decode,
                forge: None,
                url: None,
                status: None,
                source: Some(Box::new(e)),
            }),
        }
    }
}

impl From<std::io::Error> for ForgeMigrateError {
    fn from(e: std::io::Error) -> Self {
        Self {
            inner: Box::new(Inner {
                kind: ForgeMigrateErrorKind::Transient,
                forge: None,
                url: None,
                status: None,
                source: Some(Box::new(e)),
            }),
        }
    }
}

impl From<&str> for ForgeMigrateError {
    fn from(e: &str) -> Self {
        ForgeMigrateError::new(ForgeMigrateErrorKind::Config).with_text(e)
    }
}

impl From<String> for ForgeMigrateError {
    fn from(e: String) -> Self {
        ForgeMigrateError::new(ForgeMigrateErrorKind::Config).with_text(&e)
    }
}

/// Map a non-2xx status from a migration endpoint to an error kind.
pub(crate) fn classify_status(status: u16) -> ForgeMigrateErrorKind {
    match status {
        401 | 403 => ForgeMigrateErrorKind::Auth,
        409 => ForgeMigrateErrorKind::Conflict,
        400..=499 => ForgeMigrateErrorKind::MalformedRequest,
        _ => ForgeMigrateErrorKind::Transient,
    }
}
