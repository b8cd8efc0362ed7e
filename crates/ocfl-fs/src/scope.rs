//! Bounded walk scopes.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use ocfl_inventory::{InventoryReader, JsonInventoryReader};
use ocfl_resolv::Result;
use ocfl_types::{EntityRef, EntityType};

use crate::probe::find_nearest;

/// Whether a scope enumerates many entities or resolves a single one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Report every entity of the desired type under the start point.
    Enumerate,
    /// The start point already has the desired type: report only entities
    /// whose coordinates match it.
    Resolve,
}

/// A bounded set of OCFL entities: everything of one type underneath a
/// starting entity, within one storage root.
///
/// A scope lives for a single walk.
pub struct Scope {
    pub(crate) root: Arc<EntityRef>,
    pub(crate) start_from: Arc<EntityRef>,
    pub(crate) desired: Arc<EntityRef>,
    pub(crate) mode: Mode,
    pub(crate) head_only: bool,
    pub(crate) reader: Arc<dyn InventoryReader>,
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("root", &self.root.addr)
            .field("start_from", &self.start_from)
            .field("desired", &self.desired.entity_type)
            .field("mode", &self.mode)
            .field("head_only", &self.head_only)
            .finish()
    }
}

impl Scope {
    /// Define a scope for entities of type `entity_type` underneath `under`.
    ///
    /// Fails with `RootNotFound` if no storage root encloses `under`.
    pub fn new(under: EntityRef, entity_type: EntityType) -> Result<Self> {
        let reader: Arc<dyn InventoryReader> = Arc::new(JsonInventoryReader);
        let root = Arc::new(find_nearest(&under, EntityType::Root, reader.as_ref())?);

        let start_from = Arc::new(under);
        let (desired, mode) = if start_from.entity_type == entity_type {
            (Arc::clone(&start_from), Mode::Resolve)
        } else {
            (Arc::new(EntityRef::of_type(entity_type)), Mode::Enumerate)
        };

        Ok(Self {
            root,
            start_from,
            desired,
            mode,
            head_only: false,
            reader,
        })
    }

    /// Use a different source of inventories.
    pub fn with_reader(mut self, reader: Arc<dyn InventoryReader>) -> Self {
        self.reader = reader;
        self
    }

    /// Restrict versions and files to each object's head version.
    pub fn head_only(mut self, head_only: bool) -> Self {
        self.head_only = head_only;
        self
    }

    pub fn root(&self) -> &EntityRef {
        &self.root
    }

    pub fn start_from(&self) -> &EntityRef {
        &self.start_from
    }

    pub fn desired_type(&self) -> EntityType {
        self.desired.entity_type
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Decide whether an encountered entity is reported to the caller.
    pub fn contains(&self, candidate: &EntityRef) -> bool {
        let desired = self.desired.as_ref();
        if desired.entity_type == EntityType::Any {
            return true;
        }
        if candidate.entity_type != desired.entity_type {
            return false;
        }

        match self.mode {
            Mode::Enumerate => true,
            Mode::Resolve => {
                // Compare coordinates at every depth both lineages share.
                let (mut a, mut b) = (desired, candidate);
                while let (Some(pa), Some(pb)) = (a.parent(), b.parent()) {
                    if a.id != b.id {
                        return false;
                    }
                    a = pa;
                    b = pb;
                }
                candidate.entity_type <= desired.entity_type
            }
        }
    }
}

/// Root-relative, slash-separated identifier of an intermediate directory.
pub(crate) fn intermediate_id(root: &Path, dir: &Path) -> String {
    dir.strip_prefix(root)
        .unwrap_or(dir)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
