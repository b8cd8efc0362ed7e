//! The [`EntityType`] enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The kind of an OCFL entity.
///
/// The structural variants are ordered by depth in the hierarchy:
/// `Root < Intermediate < Object < Version < File`. `Any` is a wildcard
/// that matches every entity; it sorts after `File` but has no depth, so
/// traversal decisions must handle it explicitly rather than by comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// A storage root.
    Root,
    /// A directory between the storage root and an object root.
    Intermediate,
    /// An object root, described by its inventory.
    Object,
    /// One version of an object.
    Version,
    /// A logical file within a version.
    File,
    /// Wildcard: matches every entity type.
    Any,
}

impl EntityType {
    /// All structural types, shallowest first.
    pub const STRUCTURAL: [EntityType; 5] = [
        EntityType::Root,
        EntityType::Intermediate,
        EntityType::Object,
        EntityType::Version,
        EntityType::File,
    ];

    /// Depth in the hierarchy, or `None` for `Any`.
    pub fn depth(self) -> Option<u8> {
        match self {
            EntityType::Root => Some(0),
            EntityType::Intermediate => Some(1),
            EntityType::Object => Some(2),
            EntityType::Version => Some(3),
            EntityType::File => Some(4),
            EntityType::Any => None,
        }
    }

    /// Returns `true` if entities of type `other` may be in scope when this
    /// type is the desired one, i.e. a walk must reach `other`'s depth.
    ///
    /// `Any` reaches every depth.
    pub fn reaches(self, other: EntityType) -> bool {
        match (self.depth(), other.depth()) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(want), Some(at)) => at <= want,
        }
    }

    /// Lowercase name, as used on the command line and in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Root => "root",
            EntityType::Intermediate => "intermediate",
            EntityType::Object => "object",
            EntityType::Version => "version",
            EntityType::File => "file",
            EntityType::Any => "any",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "root" => Ok(EntityType::Root),
            "intermediate" => Ok(EntityType::Intermediate),
            "object" => Ok(EntityType::Object),
            "version" => Ok(EntityType::Version),
            "file" => Ok(EntityType::File),
            "any" => Ok(EntityType::Any),
            _ => Err(TypeError::UnknownEntityType(s.to_string())),
        }
    }
}
