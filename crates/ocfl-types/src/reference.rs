//! [`EntityRef`]: a single addressable OCFL entity.

use std::fmt;
use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::entity::EntityType;

/// A reference to one OCFL entity.
///
/// An entity has two identities: a logical `id` (empty for roots, the object
/// identifier for objects, the version identifier for versions, the logical
/// path for files) and a physical `addr` where it lives.
///
/// `parent` points at the nearest ancestor that is not an intermediate node:
/// objects point to their root, versions to their object, files to their
/// version. Intermediates point to the root. Following `parent` always ends
/// at a root with no parent. The link is only used to derive coordinates;
/// refs are immutable values and share parents through `Arc`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityRef {
    /// Logical identifier.
    pub id: String,
    /// Physical address (filesystem path or URI).
    pub addr: String,
    /// Kind of entity.
    pub entity_type: EntityType,
    /// Nearest non-intermediate ancestor.
    pub parent: Option<Arc<EntityRef>>,
}

impl EntityRef {
    /// Create a storage root reference.
    pub fn root(addr: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            addr: addr.into(),
            entity_type: EntityType::Root,
            parent: None,
        }
    }

    /// Create a reference with an explicit parent.
    pub fn child(
        entity_type: EntityType,
        id: impl Into<String>,
        addr: impl Into<String>,
        parent: Arc<EntityRef>,
    ) -> Self {
        Self {
            id: id.into(),
            addr: addr.into(),
            entity_type,
            parent: Some(parent),
        }
    }

    /// A bare reference carrying only a type, with no identity or location.
    pub fn of_type(entity_type: EntityType) -> Self {
        Self {
            id: String::new(),
            addr: String::new(),
            entity_type,
            parent: None,
        }
    }

    /// The parent reference, if any.
    pub fn parent(&self) -> Option<&EntityRef> {
        self.parent.as_deref()
    }

    /// Iterate over this reference and then each of its ancestors.
    pub fn lineage(&self) -> Lineage<'_> {
        Lineage { next: Some(self) }
    }

    /// The nearest entity of type `entity_type` in this reference's lineage,
    /// including itself.
    pub fn ancestor(&self, entity_type: EntityType) -> Option<&EntityRef> {
        self.lineage().find(|r| r.entity_type == entity_type)
    }

    /// Logical coordinates, root excluded, in root-to-leaf order.
    ///
    /// For a file this is `[object_id, version_id, logical_path]`.
    pub fn coords(&self) -> Vec<String> {
        let mut coords: Vec<String> = self
            .lineage()
            .take_while(|r| r.entity_type != EntityType::Root)
            .map(|r| r.id.clone())
            .collect();
        coords.reverse();
        coords
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coords = self.coords();
        if coords.is_empty() {
            return write!(f, "{}", self.entity_type);
        }
        write!(f, "{} {}", self.entity_type, coords.join("/"))
    }
}

impl Serialize for EntityRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("EntityRef", 4)?;
        s.serialize_field("type", &self.entity_type)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("addr", &self.addr)?;
        s.serialize_field("coords", &self.coords())?;
        s.end()
    }
}

/// Iterator over a reference and its ancestors, leaf first.
pub struct Lineage<'a> {
    next: Option<&'a EntityRef>,
}

impl<'a> Iterator for Lineage<'a> {
    type Item = &'a EntityRef;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}
