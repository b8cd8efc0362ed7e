//! The inventory document model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, InventoryResult};

/// A parsed OCFL object inventory.
///
/// `manifest` maps a content digest to the physical paths (relative to the
/// object root) holding that content. Each [`Version`]'s `state` maps a
/// digest to the logical paths that present it in that version.
///
/// Map iteration order carries no meaning.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    /// The object identifier.
    pub id: String,
    /// Inventory type URI (e.g. `https://ocfl.io/1.0/spec/#inventory`).
    #[serde(rename = "type", default)]
    pub inventory_type: String,
    /// Digest algorithm used for `manifest` and `state` keys.
    #[serde(default)]
    pub digest_algorithm: String,
    /// Identifier of the most recent version.
    #[serde(default)]
    pub head: String,
    /// Name of the per-version content directory, if not `content`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_directory: Option<String>,
    /// Digest to physical paths.
    #[serde(default)]
    pub manifest: HashMap<String, Vec<String>>,
    /// Version identifier to version metadata.
    #[serde(default)]
    pub versions: HashMap<String, Version>,
    /// Additional fixity digests, keyed by algorithm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixity: Option<HashMap<String, HashMap<String, Vec<String>>>>,
}

/// Metadata for one version of an object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Creation timestamp (RFC 3339), as recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// Free-text description of the version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Who created the version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Digest to logical paths.
    #[serde(default)]
    pub state: HashMap<String, Vec<String>>,
}

/// The author of a version.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// One logical file in a version, and where its content lives.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FileEntry {
    /// User-facing path, relative to the version.
    pub logical_path: String,
    /// Content path, relative to the object root.
    pub physical_path: String,
}

impl Inventory {
    /// Look up a version by identifier.
    pub fn version(&self, version_id: &str) -> Option<&Version> {
        self.versions.get(version_id)
    }

    /// Returns `true` if the inventory lists the given version.
    pub fn has_version(&self, version_id: &str) -> bool {
        self.versions.contains_key(version_id)
    }

    /// List the files of a version with their physical locations.
    ///
    /// When a digest has several physical copies, the first listed in the
    /// manifest is used. The order of the returned entries is unspecified.
    pub fn files_in(&self, version_id: &str) -> InventoryResult<Vec<FileEntry>> {
        let version = self
            .version(version_id)
            .ok_or_else(|| InventoryError::UnknownVersion {
                version: version_id.to_string(),
                object: self.id.clone(),
            })?;

        let mut files = Vec::new();
        for (digest, logical_paths) in &version.state {
            let physical_path = self
                .manifest
                .get(digest)
                .and_then(|paths| paths.first())
                .ok_or_else(|| InventoryError::MissingDigest {
                    digest: digest.clone(),
                    version: version_id.to_string(),
                })?;
            files.extend(logical_paths.iter().map(|logical_path| FileEntry {
                logical_path: logical_path.clone(),
                physical_path: physical_path.clone(),
            }));
        }
        Ok(files)
    }
}
