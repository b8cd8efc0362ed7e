//! The two-phase walk engine.
//!
//! Phase A descends directories from the start point until it meets object
//! roots, reporting intermediate directories on the way. Phase B takes over
//! at each object root and descends the object's inventory: the object,
//! then its versions, then each version's logical files. The physical
//! layout below an object root is never consulted.
//!
//! Symlinks are followed. An object reachable by more than one path is
//! descended once, through whichever path the walk meets first.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, debug_span, trace};

use ocfl_inventory::{Inventory, Version};
use ocfl_resolv::{ResolvError, Result, Visit};
use ocfl_types::{EntityRef, EntityType};

use crate::fs_walk::{fs_walk, Descent, FsEntry};
use crate::probe::{find_nearest, is_root_of};
use crate::scope::{intermediate_id, Scope};

impl Scope {
    /// Invoke `visit` for every in-scope entity.
    ///
    /// The first error, from `visit` or from I/O, ends the walk and is
    /// returned. Order of siblings, versions, and files is unspecified.
    pub fn walk(&self, visit: &mut Visit<'_>) -> Result<()> {
        let span = debug_span!(
            "walk",
            start = %self.start_from.addr,
            start_type = %self.start_from.entity_type,
            desired = %self.desired.entity_type,
        );
        let _enter = span.enter();

        // Below object granularity the walk starts at the enclosing object.
        let node = match self.start_from.entity_type {
            EntityType::Object | EntityType::Version | EntityType::File => Arc::new(find_nearest(
                &self.start_from,
                EntityType::Object,
                self.reader.as_ref(),
            )?),
            _ => Arc::clone(&self.start_from),
        };

        if node.entity_type == EntityType::Root && self.contains(&node) {
            visit(node.as_ref().clone())?;
        }
        if self.desired.entity_type == EntityType::Root {
            return Ok(());
        }

        let start = if node.addr.is_empty() {
            &self.root.addr
        } else {
            &node.addr
        };
        debug!(path = %start, "descending directories");
        let mut walked = HashSet::new();
        fs_walk(Path::new(start), |entry| self.visit_entry(entry, &mut walked, visit))
    }

    /// Phase A: classify one directory entry. `walked` holds the canonical
    /// paths of objects already descended.
    fn visit_entry(
        &self,
        entry: &FsEntry<'_>,
        walked: &mut HashSet<PathBuf>,
        visit: &mut Visit<'_>,
    ) -> Result<Descent> {
        // Plain files are never structural nodes.
        if !entry.is_dir {
            return Ok(Descent::Prune);
        }

        let object = is_root_of(entry.path, EntityType::Object).map_err(|source| {
            ResolvError::ObjectProbeFailed {
                path: entry.path.to_path_buf(),
                source,
            }
        })?;
        if object.is_some() {
            let canonical = entry
                .path
                .canonicalize()
                .map_err(|source| ResolvError::DirectoryAccessFailed {
                    path: entry.path.to_path_buf(),
                    source,
                })?;
            if walked.insert(canonical) {
                self.walk_object(entry.path, visit)?;
            } else {
                trace!(path = %entry.path.display(), "object already walked");
            }
            return Ok(Descent::Prune);
        }

        let root = Path::new(&self.root.addr);
        if entry.path != root {
            let intermediate = EntityRef::child(
                EntityType::Intermediate,
                intermediate_id(root, entry.path),
                entry.path.to_string_lossy(),
                Arc::clone(&self.root),
            );
            if self.contains(&intermediate) {
                visit(intermediate)?;
            }
        }
        Ok(Descent::Continue)
    }

    /// Phase B: descend an object's inventory.
    fn walk_object(&self, path: &Path, visit: &mut Visit<'_>) -> Result<()> {
        // Nothing inside an object can match an intermediate-only walk.
        if !self.desired.entity_type.reaches(EntityType::Object) {
            trace!(path = %path.display(), "object skipped");
            return Ok(());
        }

        let inventory = self
            .reader
            .load(path)
            .map_err(|source| ResolvError::ManifestLoadFailed {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(object = %inventory.id, path = %path.display(), "descending object");

        // Resolve the version set before reporting anything for this object.
        let versions = if self.desired.entity_type.reaches(EntityType::Version) {
            Some(self.versions_in_scope(&inventory)?)
        } else {
            None
        };

        let object = Arc::new(EntityRef::child(
            EntityType::Object,
            inventory.id.clone(),
            path.to_string_lossy(),
            Arc::clone(&self.root),
        ));
        if self.contains(&object) {
            visit(object.as_ref().clone())?;
        }

        match versions {
            Some(versions) => self.walk_versions(&inventory, &object, versions, visit),
            None => Ok(()),
        }
    }

    /// The versions of `inventory` a walk descends into.
    ///
    /// A walk entered at a version or file is narrowed to that one version,
    /// which must exist. Head-only walks keep only the head version.
    fn versions_in_scope<'i>(&self, inventory: &'i Inventory) -> Result<Vec<(&'i str, &'i Version)>> {
        let mut versions: Vec<(&str, &Version)> = match self.start_from.entity_type {
            EntityType::Version | EntityType::File => {
                let wanted = self
                    .start_from
                    .ancestor(EntityType::Version)
                    .map(|v| v.id.as_str())
                    .unwrap_or_default();
                let (id, version) = inventory.versions.get_key_value(wanted).ok_or_else(|| {
                    ResolvError::VersionNotFound {
                        version: wanted.to_string(),
                        object: inventory.id.clone(),
                    }
                })?;
                vec![(id.as_str(), version)]
            }
            _ => inventory
                .versions
                .iter()
                .map(|(id, version)| (id.as_str(), version))
                .collect(),
        };

        if self.head_only {
            versions.retain(|(id, _)| *id == inventory.head);
        }
        Ok(versions)
    }

    fn walk_versions(
        &self,
        inventory: &Inventory,
        object: &Arc<EntityRef>,
        versions: Vec<(&str, &Version)>,
        visit: &mut Visit<'_>,
    ) -> Result<()> {
        let object_dir = Path::new(&object.addr);

        for (vid, _) in versions {
            trace!(object = %object.id, version = vid, "descending version");
            let version = Arc::new(EntityRef::child(
                EntityType::Version,
                vid,
                object_dir.join(vid).to_string_lossy(),
                Arc::clone(object),
            ));
            if self.contains(&version) {
                visit(version.as_ref().clone())?;
            }

            if !self.desired.entity_type.reaches(EntityType::File) {
                continue;
            }
            let files = inventory
                .files_in(vid)
                .map_err(|source| ResolvError::ManifestLoadFailed {
                    path: object_dir.to_path_buf(),
                    source,
                })?;
            for file in files {
                let file = EntityRef::child(
                    EntityType::File,
                    file.logical_path,
                    object_dir.join(&file.physical_path).to_string_lossy(),
                    Arc::clone(&version),
                );
                if self.contains(&file) {
                    visit(file)?;
                }
            }
        }
        Ok(())
    }
}
