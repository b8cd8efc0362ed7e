//! Error types for inventory operations.

use std::path::PathBuf;

/// Errors that can occur while loading or reading an inventory.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// The inventory file could not be read.
    #[error("cannot read inventory {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The inventory file is not valid inventory JSON.
    #[error("cannot parse inventory {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The requested version is not present in the inventory.
    #[error("no version {version} exists in {object}")]
    UnknownVersion { version: String, object: String },

    /// A version's state references a digest the manifest does not list.
    #[error("digest {digest} in version {version} is missing from the manifest")]
    MissingDigest { digest: String, version: String },
}

/// Convenience alias for inventory results.
pub type InventoryResult<T> = Result<T, InventoryError>;
