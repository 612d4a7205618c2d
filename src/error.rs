use std::path::PathBuf;

use thiserror::Error;

/// Failure taxonomy for a run.
///
/// Every variant is fatal: errors propagate up through `anyhow` and abort the
/// whole run without partial cleanup.
#[derive(Debug, Error)]
pub enum Error {
    /// Host or synthetic descriptor is absent or violates the POM schema.
    #[error("malformed descriptor {path}: {reason}")]
    MalformedDescriptor { path: PathBuf, reason: String },

    /// Filesystem read/write failure (descriptor write, report append).
    #[error("i/o failure on {path}: {source}")]
    IoFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Maven could not be launched or exited non-zero for one dependency.
    /// Carries the coordinate of the dependency under test for diagnosis.
    #[error("dependency resolution failed for {coordinate}: {reason}")]
    ResolutionFailure { coordinate: String, reason: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::IoFailure {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::MalformedDescriptor {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn resolution(coordinate: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::ResolutionFailure {
            coordinate: coordinate.into(),
            reason: reason.into(),
        }
    }
}
