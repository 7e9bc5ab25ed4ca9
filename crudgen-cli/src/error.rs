//! Error types for scaffold generation

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the scaffold library
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Errors that can occur while parsing, rendering or emitting a scaffold
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// A field segment could not be split into a name and a type
    #[error("malformed field specification '{segment}': {reason}")]
    MalformedFieldSpec {
        /// The offending comma-separated segment
        segment: String,
        /// What was wrong with it
        reason: &'static str,
    },

    /// A field type outside the known set (strict mode only)
    #[error("unknown field type '{type_name}' for field '{field}'")]
    UnknownFieldType {
        /// Field name
        field: String,
        /// Type string as written by the user
        type_name: String,
    },

    /// The resource name cannot be used as a class name
    #[error("invalid resource name '{0}': must start with a letter and contain only letters, digits or '_'")]
    InvalidResourceName(String),

    /// A stub could not be located in any configured source
    #[error("stub '{name}' not found: {source}")]
    StubNotFound {
        /// Stub name (e.g. `views/index`)
        name: String,
        /// Underlying read error
        #[source]
        source: std::io::Error,
    },

    /// Directory creation, file write or route append failed
    #[error("failed to write {}: {source}", path.display())]
    WriteFailure {
        /// Path that could not be written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),
}

impl ScaffoldError {
    /// Create a malformed field specification error
    #[must_use]
    pub fn malformed<T: Into<String>>(segment: T, reason: &'static str) -> Self {
        Self::MalformedFieldSpec {
            segment: segment.into(),
            reason,
        }
    }

    /// Create a write failure error for `path`
    #[must_use]
    pub fn write<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::WriteFailure {
            path: path.into(),
            source,
        }
    }
}

impl From<figment::Error> for ScaffoldError {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ScaffoldError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Config(err.to_string())
    }
}
