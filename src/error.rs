//! Error types for Amber
//!
//! All modules use `AmberResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Amber operations
pub type AmberResult<T> = Result<T, AmberError>;

/// All errors that can occur in Amber
#[derive(Error, Debug)]
pub enum AmberError {
    // Repository errors
    #[error("no repository: no {marker} directory found from {start} upwards")]
    NoRepository { marker: String, start: PathBuf },

    #[error("no repository: {path} exists but is not a directory")]
    RepositoryConflict { path: PathBuf },

    // Algorithm errors
    #[error("unknown encryption algorithm: {0}")]
    UnknownEncryption(String),

    #[error("unknown decryption algorithm: {0}")]
    UnknownDecryption(String),

    #[error("unknown hash: {0}")]
    UnknownHash(String),

    #[error("invalid key length for {cipher}: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        cipher: String,
        expected: usize,
        actual: usize,
    },

    #[error("invalid iv length for {cipher}: expected at least {expected} bytes, got {actual}")]
    InvalidIvLength {
        cipher: String,
        expected: usize,
        actual: usize,
    },

    // Protocol errors
    #[error("invalid line format: {0}")]
    InvalidLineFormat(String),

    #[error("artifact header is not terminated by a blank line")]
    MissingHeaderTerminator,

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl AmberError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// True for both "marker not found" and "marker is not a directory".
    ///
    /// Callers that only care whether a usable repository exists treat the
    /// two the same; the variants stay apart for diagnostics.
    pub fn is_no_repository(&self) -> bool {
        matches!(
            self,
            Self::NoRepository { .. } | Self::RepositoryConflict { .. }
        )
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NoRepository { .. } => {
                Some("Create the marker directory at the top of your project")
            }
            Self::RepositoryConflict { .. } => {
                Some("Remove or rename the file shadowing the marker directory")
            }
            Self::UnknownEncryption(_) | Self::UnknownDecryption(_) => {
                Some("Supported ciphers: -, aes128, aes192, aes256")
            }
            Self::UnknownHash(_) => Some("Supported hashes: sha1, sha256, sha512"),
            _ => None,
        }
    }
}
