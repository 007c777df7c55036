//! Error types for the VFS plugin core.
//!
//! All errors use `thiserror` for ergonomic error handling and proper error chains.
//! Mount-table failures are not represented here: the resolver hands back the
//! mount-table source's own error type untouched.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for VFS operations.
pub type Result<T> = std::result::Result<T, VfsError>;

/// Coarse classification used by the RPC layer to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Internal,
    Configuration,
}

/// Main error type for the VFS core.
#[derive(Error, Debug)]
pub enum VfsError {
    // Lookup errors
    #[error("Volume not found: {path:?}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    // Persistence errors
    #[error("Internal error: {reason}")]
    Internal {
        reason: String,
        #[source]
        source: Option<std::io::Error>,
    },

    // Startup errors
    #[error("Invalid configuration at {path:?}: {reason}")]
    Configuration {
        path: PathBuf,
        reason: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl VfsError {
    /// A missing volume directory or metadata file.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into(), source: None }
    }

    /// An internal failure with no underlying I/O error.
    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal { reason: reason.into(), source: None }
    }

    /// An internal failure caused by an I/O error.
    pub fn internal_io(reason: impl Into<String>, source: std::io::Error) -> Self {
        Self::Internal { reason: reason.into(), source: Some(source) }
    }

    pub fn configuration(
        path: impl Into<PathBuf>,
        reason: impl Into<String>,
        source: Option<std::io::Error>,
    ) -> Self {
        Self::Configuration { path: path.into(), reason: reason.into(), source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Internal { .. } => ErrorKind::Internal,
            Self::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
