//! Error types shared by the extractor and the renderer.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification reported to the operator when a run aborts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Auth,
    Upstream,
    Metadata,
    Io,
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Auth => write!(f, "AuthError"),
            ErrorKind::Upstream => write!(f, "UpstreamError"),
            ErrorKind::Metadata => write!(f, "MetadataError"),
            ErrorKind::Io => write!(f, "IOError"),
            ErrorKind::Config => write!(f, "ConfigError"),
        }
    }
}

/// Errors that abort an extract or render run.
#[derive(Debug, Error)]
pub enum ErdError {
    /// Credential missing, or rejected by the upstream API.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Upstream API returned a non-success status code.
    #[error("upstream returned {status} for {url}: {message}")]
    Upstream {
        status: u16,
        url: String,
        message: String,
    },

    /// Request could not be sent, or the response body could not be decoded.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Reading or writing a document failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Schema document is not valid JSON for the expected shape.
    #[error("invalid schema document {}: {source}", .path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Startup configuration is missing or malformed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ErdError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErdError::Auth(_) => ErrorKind::Auth,
            ErdError::Upstream { .. } | ErdError::Transport { .. } => ErrorKind::Upstream,
            ErdError::Io { .. } | ErdError::Document { .. } => ErrorKind::Io,
            ErdError::Config(_) => ErrorKind::Config,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ErdError::Io {
            path: path.into(),
            source,
        }
    }
}

/// A field whose link metadata could not be resolved.
///
/// Never fatal: the field is kept without a link and the issue is reported
/// alongside the extracted schema.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{table}.{field}: {reason}")]
pub struct MetadataError {
    pub table: String,
    pub field: String,
    pub reason: String,
}

impl MetadataError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Metadata
    }
}

pub type Result<T> = std::result::Result<T, ErdError>;
