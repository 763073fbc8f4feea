//! Error types for Quality Console
//!
//! Centralized error handling using snafu for ergonomic error definitions.

use serde::Deserialize;
use snafu::Snafu;

/// Structured error payload returned by the backend.
///
/// Either field may be absent; `detail` wins over `message` when both are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Body carrying only a `detail` field
    pub fn detail(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            message: None,
        }
    }

    /// Body carrying only a `message` field
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            detail: None,
            message: Some(message.into()),
        }
    }

    /// First non-empty text in `detail`, `message` order
    pub fn text(&self) -> Option<&str> {
        [self.detail.as_deref(), self.message.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
    }
}

/// Main error type for the application
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// IO error (file operations)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },

    /// Transport-level HTTP failure (connect, timeout, decode)
    #[snafu(display("HTTP error: {source}"))]
    Http { source: reqwest::Error },

    /// The backend answered with a non-success status
    #[snafu(display("API error {status}: {}", body.text().unwrap_or("no details")))]
    Api { status: u16, body: ApiErrorBody },

    /// Login or session failure, already phrased for the user
    #[snafu(display("Authentication failed: {message}"))]
    Auth { message: String },

    /// A row has no usable value in its identity field
    #[snafu(display("Row has no usable identity in field '{field}'"))]
    MissingIdentity { field: String },

    /// A delete for this row is already running
    #[snafu(display("Delete already in progress for row {key}"))]
    DeleteInFlight { key: String },

    /// The owner did not supply the callback this action needs
    #[snafu(display("Operation not supported: {operation}"))]
    Unsupported { operation: String },
}

impl Error {
    /// Build an API error carrying a structured payload
    pub fn api(status: u16, body: ApiErrorBody) -> Self {
        Error::Api { status, body }
    }

    /// Returns the HTTP status code if this is an API error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http { source } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Text to show the user: payload `detail`, then `message`, then `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Error::Api { body, .. } => body.text().unwrap_or(fallback).to_string(),
            Error::Auth { message } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Error::Http { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
