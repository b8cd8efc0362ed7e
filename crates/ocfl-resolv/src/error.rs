//! Error types for entity resolution.

use std::path::PathBuf;

use ocfl_inventory::InventoryError;
use thiserror::Error;

/// Errors that can occur while resolving or walking OCFL entities.
///
/// Every error is fatal to the walk in progress. Skipping a subtree is not
/// an error and is never reported through this type.
#[derive(Debug, Error)]
pub enum ResolvError {
    /// No storage root encloses the given location.
    #[error("no OCFL root found above {location}")]
    RootNotFound { location: String },

    /// No object with the given identifier exists under the root.
    #[error("no object {id} exists under {root}")]
    ObjectNotFound { id: String, root: String },

    /// A directory could not be classified as a root or object.
    #[error("cannot probe {path:?} for an OCFL declaration: {source}")]
    ObjectProbeFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An object's inventory could not be loaded or read.
    #[error("cannot load inventory of object at {path:?}: {source}")]
    ManifestLoadFailed {
        path: PathBuf,
        #[source]
        source: InventoryError,
    },

    /// A single-version walk named a version the object does not have.
    #[error("no version {version} exists in {object}")]
    VersionNotFound { version: String, object: String },

    /// The caller's callback failed.
    #[error("callback failed: {0}")]
    Callback(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A directory could not be read or stat'ed.
    #[error("error walking directory {path:?}: {source}")]
    DirectoryAccessFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A location does not denote an OCFL entity.
    #[error("invalid location: {0}")]
    InvalidLocation(String),

    /// No configured driver could serve the storage root.
    #[error("no suitable driver found for {root:?}")]
    NoSuitableDriver { root: PathBuf },

    /// The operation is not supported by this driver.
    #[error("operation not supported: {0}")]
    Unsupported(&'static str),
}

impl ResolvError {
    /// Wrap an arbitrary error raised inside a walk callback.
    pub fn callback<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        ResolvError::Callback(err.into())
    }
}

/// Convenience type alias for resolution results.
pub type Result<T> = std::result::Result<T, ResolvError>;
