//! The local filesystem [`Driver`](ocfl_resolv::Driver).

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use ocfl_inventory::{InventoryReader, JsonInventoryReader};
use ocfl_resolv::{Location, Opener, Options, ResolvError, Result, Select, Session, Visit, Walker};
use ocfl_types::{EntityRef, EntityType};

use crate::probe::{self, find_nearest, nearest_object};
use crate::scope::{intermediate_id, Scope};
use crate::session::FileSession;

/// OCFL driver for storage roots on a local filesystem.
///
/// Physical locations work without a configured root: the enclosing root
/// is found by probing ancestor directories. Logical locations and
/// [`Location::Root`] need one.
pub struct FileDriver {
    root: Option<PathBuf>,
    reader: Arc<dyn InventoryReader>,
}

impl fmt::Debug for FileDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileDriver").field("root", &self.root).finish()
    }
}

impl Default for FileDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FileDriver {
    /// A driver with no configured storage root.
    pub fn new() -> Self {
        Self {
            root: None,
            reader: Arc::new(JsonInventoryReader),
        }
    }

    /// A driver serving the storage root at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            ..Self::new()
        }
    }

    /// Use a different source of inventories.
    pub fn with_reader(mut self, reader: Arc<dyn InventoryReader>) -> Self {
        self.reader = reader;
        self
    }

    /// Turn a location into the entity a walk starts from.
    pub fn resolve(&self, location: &Location) -> Result<EntityRef> {
        match location {
            Location::Root => self.resolve_physical(self.configured_root()?),
            Location::Physical(path) => self.resolve_physical(path),
            Location::Logical(coords) => self.resolve_logical(coords),
        }
    }

    fn configured_root(&self) -> Result<&Path> {
        self.root.as_deref().ok_or_else(|| {
            ResolvError::InvalidLocation("no storage root is configured".to_string())
        })
    }

    fn scope(&self, start: EntityRef, entity_type: EntityType) -> Result<Scope> {
        Ok(Scope::new(start, entity_type)?.with_reader(Arc::clone(&self.reader)))
    }

    fn resolve_physical(&self, path: &Path) -> Result<EntityRef> {
        let dir = path
            .canonicalize()
            .map_err(|source| ResolvError::DirectoryAccessFailed {
                path: path.to_path_buf(),
                source,
            })?;
        if !dir.is_dir() {
            return Err(ResolvError::InvalidLocation(format!(
                "{} is not a directory",
                dir.display()
            )));
        }

        let declared = probe::declaration(&dir).map_err(|source| ResolvError::ObjectProbeFailed {
            path: dir.clone(),
            source,
        })?;
        match declared.map(|d| d.entity_type) {
            Some(EntityType::Root) => return Ok(EntityRef::root(dir.to_string_lossy())),
            Some(EntityType::Object) => return probe::object_ref(&dir, self.reader.as_ref()),
            _ => {}
        }

        let mut probe_ref = EntityRef::of_type(EntityType::Intermediate);
        probe_ref.addr = dir.to_string_lossy().into_owned();
        let root = find_nearest(&probe_ref, EntityType::Root, self.reader.as_ref())?;

        if let Some(object_dir) = nearest_object(&dir, Path::new(&root.addr))? {
            return self.resolve_in_object(&dir, object_dir);
        }

        Ok(EntityRef::child(
            EntityType::Intermediate,
            intermediate_id(Path::new(&root.addr), &dir),
            probe_ref.addr,
            Arc::new(root),
        ))
    }

    /// Only version directories directly under the object root are entities.
    fn resolve_in_object(&self, dir: &Path, object_dir: &Path) -> Result<EntityRef> {
        let version_id = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .filter(|_| dir.parent() == Some(object_dir));
        let object = probe::object_ref(object_dir, self.reader.as_ref())?;

        let inventory = self
            .reader
            .load(object_dir)
            .map_err(|source| ResolvError::ManifestLoadFailed {
                path: object_dir.to_path_buf(),
                source,
            })?;
        match version_id {
            Some(vid) if inventory.has_version(&vid) => Ok(EntityRef::child(
                EntityType::Version,
                vid,
                dir.to_string_lossy(),
                Arc::new(object),
            )),
            _ => Err(ResolvError::InvalidLocation(format!(
                "{} is inside object {} but is not a version directory",
                dir.display(),
                object.id
            ))),
        }
    }

    fn resolve_logical(&self, coords: &[String]) -> Result<EntityRef> {
        let root = self.resolve_physical(self.configured_root()?)?;
        if root.entity_type != EntityType::Root {
            return Err(ResolvError::RootNotFound {
                location: root.addr,
            });
        }

        let (object_id, rest) = match coords.split_first() {
            Some(split) => split,
            None => return Ok(root),
        };
        let object = Arc::new(self.find_object(root, object_id)?);
        let Some((version_id, rest)) = rest.split_first() else {
            return Ok(object.as_ref().clone());
        };

        let version = EntityRef::child(
            EntityType::Version,
            version_id.as_str(),
            Path::new(&object.addr).join(version_id).to_string_lossy(),
            object,
        );
        match rest {
            [] => Ok(version),
            [logical_path] => Ok(EntityRef::child(
                EntityType::File,
                logical_path.as_str(),
                "",
                Arc::new(version),
            )),
            _ => Err(ResolvError::InvalidLocation(format!(
                "too many coordinates: {}",
                coords.join("/")
            ))),
        }
    }

    /// Locate an object under `root` by identifier.
    fn find_object(&self, root: EntityRef, id: &str) -> Result<EntityRef> {
        let root_addr = root.addr.clone();
        let mut found = None;
        self.scope(root, EntityType::Object)?.walk(&mut |object| {
            if found.is_none() && object.id == id {
                found = Some(object);
            }
            Ok(())
        })?;
        debug!(id, found = found.is_some(), "object lookup");
        found.ok_or_else(|| ResolvError::ObjectNotFound {
            id: id.to_string(),
            root: root_addr,
        })
    }
}

impl Walker for FileDriver {
    fn walk(&self, select: Select, location: &Location, visit: &mut Visit<'_>) -> Result<()> {
        let start = self.resolve(location)?;
        self.scope(start, select.entity_type)?
            .head_only(select.head)
            .walk(visit)
    }
}

impl Opener for FileDriver {
    fn open(&self, id: &str, options: &Options) -> Result<Box<dyn Session>> {
        let root = self.resolve(&Location::Root)?;
        match self.find_object(root, id) {
            Ok(object) => Ok(Box::new(FileSession::new(object, options.clone()))),
            Err(ResolvError::ObjectNotFound { .. }) if options.create => {
                Err(ResolvError::Unsupported("create"))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;

    use ocfl_resolv::{Config, Resolver};

    use crate::fixture::Fixture;

    fn collect(driver: &FileDriver, select: Select, location: &Location) -> Result<Vec<EntityRef>> {
        let mut found = Vec::new();
        driver.walk(select, location, &mut |r| {
            found.push(r);
            Ok(())
        })?;
        Ok(found)
    }

    fn logical(coords: &[&str]) -> Location {
        Location::logical(coords.iter().copied()).unwrap()
    }

    #[test]
    fn resolves_physical_root_and_object() {
        let (fx, object) = Fixture::two_versions();
        let driver = FileDriver::new();

        let root = driver.resolve(&Location::Physical(fx.root().to_path_buf())).unwrap();
        assert_eq!(root.entity_type, EntityType::Root);

        let obj = driver.resolve(&Location::Physical(object)).unwrap();
        assert_eq!(obj.entity_type, EntityType::Object);
        assert_eq!(obj.id, "obj-A");
    }

    #[test]
    fn resolves_physical_intermediate_and_version() {
        let (fx, object) = Fixture::two_versions();
        let driver = FileDriver::new();

        let mid = driver.resolve(&Location::Physical(fx.root().join("ab"))).unwrap();
        assert_eq!(mid.entity_type, EntityType::Intermediate);
        assert_eq!(mid.id, "ab");

        let version = driver.resolve(&Location::Physical(object.join("v2"))).unwrap();
        assert_eq!(version.entity_type, EntityType::Version);
        assert_eq!(version.coords(), ["obj-A", "v2"]);
    }

    #[test]
    fn content_directory_is_not_an_entity() {
        let (_fx, object) = Fixture::two_versions();
        let err = FileDriver::new()
            .resolve(&Location::Physical(object.join("v1/content")))
            .unwrap_err();
        assert!(matches!(err, ResolvError::InvalidLocation(_)));
    }

    #[test]
    fn missing_physical_path() {
        let fx = Fixture::new();
        let err = FileDriver::new()
            .resolve(&Location::Physical(fx.root().join("nope")))
            .unwrap_err();
        assert!(matches!(err, ResolvError::DirectoryAccessFailed { .. }));
    }

    #[test]
    fn directory_outside_any_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileDriver::new()
            .resolve(&Location::Physical(dir.path().to_path_buf()))
            .unwrap_err();
        assert!(matches!(err, ResolvError::RootNotFound { .. }));
    }

    #[test]
    fn resolves_logical_coordinates() {
        let (fx, object) = Fixture::two_versions();
        let driver = FileDriver::with_root(fx.root());

        let obj = driver.resolve(&logical(&["obj-A"])).unwrap();
        assert_eq!(Path::new(&obj.addr), object);

        let file = driver.resolve(&logical(&["obj-A", "v2", "b.txt"])).unwrap();
        assert_eq!(file.entity_type, EntityType::File);
        assert_eq!(file.coords(), ["obj-A", "v2", "b.txt"]);
    }

    #[test]
    fn unknown_object_id() {
        let (fx, _) = Fixture::two_versions();
        let err = FileDriver::with_root(fx.root())
            .resolve(&logical(&["obj-Z"]))
            .unwrap_err();
        assert!(matches!(err, ResolvError::ObjectNotFound { ref id, .. } if id == "obj-Z"));
    }

    #[test]
    fn logical_needs_configured_root() {
        let err = FileDriver::new().resolve(&logical(&["obj-A"])).unwrap_err();
        assert!(matches!(err, ResolvError::InvalidLocation(_)));
    }

    #[test]
    fn walk_whole_root_for_files() {
        let (fx, _) = Fixture::two_versions();
        let driver = FileDriver::with_root(fx.root());
        let found = collect(&driver, Select::of(EntityType::File), &Location::Root).unwrap();
        let coords: BTreeSet<Vec<String>> = found.iter().map(EntityRef::coords).collect();
        assert_eq!(coords.len(), 3);
    }

    #[test]
    fn walk_logical_file_resolves_one() {
        let (fx, object) = Fixture::two_versions();
        let driver = FileDriver::with_root(fx.root());
        let found = collect(
            &driver,
            Select::of(EntityType::File),
            &logical(&["obj-A", "v2", "a.txt"]),
        )
        .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(Path::new(&found[0].addr), object.join("v1/content/a.txt"));
    }

    #[test]
    fn walk_logical_version_lists_its_files() {
        let (fx, _) = Fixture::two_versions();
        let driver = FileDriver::with_root(fx.root());
        let found = collect(&driver, Select::of(EntityType::File), &logical(&["obj-A", "v1"])).unwrap();
        let paths: Vec<&str> = found.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(paths, vec!["a.txt"]);
    }

    #[test]
    fn walk_missing_logical_version() {
        let (fx, _) = Fixture::two_versions();
        let driver = FileDriver::with_root(fx.root());
        let err = collect(&driver, Select::of(EntityType::File), &logical(&["obj-A", "v3"])).unwrap_err();
        assert!(matches!(err, ResolvError::VersionNotFound { .. }));
    }

    #[test]
    fn walk_head_versions() {
        let (fx, _) = Fixture::two_versions();
        let driver = FileDriver::with_root(fx.root());
        let found = collect(&driver, Select::of(EntityType::Version).head(), &Location::Root).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "v2");
    }

    #[test]
    fn walk_from_physical_intermediate() {
        let fx = Fixture::new();
        fx.object("a/obj-A", "obj-A", &[("v1", &["a.txt"])]);
        fx.object("b/obj-B", "obj-B", &[("v1", &["b.txt"])]);
        let found = collect(
            &FileDriver::new(),
            Select::of(EntityType::Object),
            &Location::Physical(fx.root().join("a")),
        )
        .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "obj-A");
    }

    #[test]
    fn object_marker_above_root_is_ignored() {
        let (fx, _) = Fixture::two_versions();
        let above = fx.root().parent().unwrap();
        fs::write(above.join("0=ocfl_object_1.0"), "ocfl_object_1.0\n").unwrap();

        let ab = Location::Physical(fx.root().join("ab"));
        let mid = FileDriver::new().resolve(&ab).unwrap();
        assert_eq!(mid.entity_type, EntityType::Intermediate);
        assert_eq!(mid.id, "ab");

        let found = collect(&FileDriver::new(), Select::of(EntityType::Object), &ab).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "obj-A");
    }

    #[test]
    fn resolver_binds_file_driver() {
        let (fx, _) = Fixture::two_versions();
        let resolver = Resolver::init(Config {
            root: fx.root().to_path_buf(),
            drivers: vec![Arc::new(FileDriver::with_root(fx.root()))],
        })
        .unwrap();
        assert_eq!(resolver.root().addr, fx.root_str());
    }

    #[test]
    fn resolver_rejects_non_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("plain")).unwrap();
        let result = Resolver::init(Config {
            root: dir.path().join("plain"),
            drivers: vec![Arc::new(FileDriver::new())],
        });
        assert!(matches!(result, Err(ResolvError::NoSuitableDriver { .. })));
    }

    #[test]
    fn open_binds_session_to_object() {
        let (fx, _) = Fixture::two_versions();
        let driver = FileDriver::with_root(fx.root());
        let mut session = driver.open("obj-A", &Options::default()).unwrap();
        let err = session.put("c.txt", &mut "content".as_bytes()).unwrap_err();
        assert!(matches!(err, ResolvError::Unsupported("put")));
    }

    #[test]
    fn open_missing_object() {
        let (fx, _) = Fixture::two_versions();
        let driver = FileDriver::with_root(fx.root());
        let create = Options {
            create: true,
            ..Options::default()
        };
        assert!(matches!(
            driver.open("new", &create).err().unwrap(),
            ResolvError::Unsupported("create")
        ));
        assert!(matches!(
            driver.open("new", &Options::default()).err().unwrap(),
            ResolvError::ObjectNotFound { .. }
        ));
    }
}
