//! Detection of storage roots and object roots.
//!
//! OCFL marks both kinds of root with a conformance declaration file in the
//! directory: `0=ocfl_1.0` for a storage root, `0=ocfl_object_1.0` for an
//! object root.

use std::io;
use std::path::Path;
use std::sync::Arc;

use ocfl_inventory::InventoryReader;
use ocfl_resolv::{ResolvError, Result};
use ocfl_types::{EntityRef, EntityType};

const DECLARATION_PREFIX: &str = "0=";
const OBJECT_CONFORMANCE: &str = "ocfl_object_";
const ROOT_CONFORMANCE: &str = "ocfl_";

/// A conformance declaration found in a directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// What the directory is: `Root` or `Object`.
    pub entity_type: EntityType,
    /// Declared conformance, e.g. `ocfl_object_1.0`.
    pub conformance: String,
}

/// Read the conformance declaration of a directory, if it has one.
pub fn declaration(dir: &Path) -> io::Result<Option<Declaration>> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(conformance) = name.to_str().and_then(|n| n.strip_prefix(DECLARATION_PREFIX))
        else {
            continue;
        };
        let entity_type = if conformance.starts_with(OBJECT_CONFORMANCE) {
            EntityType::Object
        } else if conformance.starts_with(ROOT_CONFORMANCE) {
            EntityType::Root
        } else {
            continue;
        };
        return Ok(Some(Declaration {
            entity_type,
            conformance: conformance.to_string(),
        }));
    }
    Ok(None)
}

/// Returns the declaration of `dir` if it is a root of the given type.
pub fn is_root_of(dir: &Path, entity_type: EntityType) -> io::Result<Option<Declaration>> {
    Ok(declaration(dir)?.filter(|d| d.entity_type == entity_type))
}

/// Resolve the nearest entity of type `entity_type` enclosing `start`.
///
/// The logical lineage of `start` is consulted first. Otherwise the physical
/// address is probed, walking up through its ancestor directories. Only
/// `Root` and `Object` can be found physically.
pub fn find_nearest(
    start: &EntityRef,
    entity_type: EntityType,
    reader: &dyn InventoryReader,
) -> Result<EntityRef> {
    if let Some(found) = start.ancestor(entity_type) {
        return Ok(found.clone());
    }

    let not_found = || ResolvError::RootNotFound {
        location: describe(start),
    };
    if start.addr.is_empty() {
        return Err(not_found());
    }

    match entity_type {
        EntityType::Root => nearest_root(Path::new(&start.addr))?.ok_or_else(not_found),
        EntityType::Object => {
            let root = find_nearest(start, EntityType::Root, reader)?;
            match nearest_object(Path::new(&start.addr), Path::new(&root.addr))? {
                Some(dir) => object_ref(dir, reader),
                None => Err(not_found()),
            }
        }
        _ => Err(not_found()),
    }
}

/// Build the object reference for an object root directory.
pub fn object_ref(dir: &Path, reader: &dyn InventoryReader) -> Result<EntityRef> {
    let root = nearest_root(dir)?.ok_or_else(|| ResolvError::RootNotFound {
        location: dir.display().to_string(),
    })?;
    let inventory = reader
        .load(dir)
        .map_err(|source| ResolvError::ManifestLoadFailed {
            path: dir.to_path_buf(),
            source,
        })?;
    Ok(EntityRef::child(
        EntityType::Object,
        inventory.id,
        dir.to_string_lossy(),
        Arc::new(root),
    ))
}

fn nearest_root(path: &Path) -> Result<Option<EntityRef>> {
    Ok(nearest_declared(path, EntityType::Root)?
        .map(|dir| EntityRef::root(dir.to_string_lossy())))
}

/// First directory among `path` and its ancestors declaring `entity_type`.
fn nearest_declared(path: &Path, entity_type: EntityType) -> Result<Option<&Path>> {
    first_declaring(path.ancestors(), entity_type)
}

/// Nearest object root enclosing `path`. Directories above the storage root
/// at `root` are never probed.
pub(crate) fn nearest_object<'p>(path: &'p Path, root: &Path) -> Result<Option<&'p Path>> {
    let within = path.ancestors().take_while(|dir| dir.starts_with(root));
    first_declaring(within, EntityType::Object)
}

fn first_declaring<'p>(
    dirs: impl Iterator<Item = &'p Path>,
    entity_type: EntityType,
) -> Result<Option<&'p Path>> {
    for dir in dirs.filter(|p| p.is_dir()) {
        let found = is_root_of(dir, entity_type).map_err(|source| ResolvError::ObjectProbeFailed {
            path: dir.to_path_buf(),
            source,
        })?;
        if found.is_some() {
            return Ok(Some(dir));
        }
    }
    Ok(None)
}

fn describe(r: &EntityRef) -> String {
    if r.addr.is_empty() {
        r.coords().join("/")
    } else {
        r.addr.clone()
    }
}
