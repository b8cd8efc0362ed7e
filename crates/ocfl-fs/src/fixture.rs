//! On-disk storage roots for tests.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Map};
use tempfile::TempDir;

use ocfl_inventory::INVENTORY_FILE;

/// A temporary storage root.
pub struct Fixture {
    _dir: TempDir,
    root: PathBuf,
}

impl Fixture {
    /// Create an empty storage root with a root declaration.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap().join("ocfl-root");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("0=ocfl_1.0"), "ocfl_1.0\n").unwrap();
        Self { _dir: dir, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn root_str(&self) -> String {
        self.root.to_string_lossy().into_owned()
    }

    /// Create a plain directory under the root.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.root.join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Create an object at `rel` with the given versions, each listing its
    /// logical files. Content shared by name across versions is stored once,
    /// under the first version that introduces it. The last version is head.
    pub fn object(&self, rel: &str, id: &str, versions: &[(&str, &[&str])]) -> PathBuf {
        let path = self.dir(rel);
        fs::write(path.join("0=ocfl_object_1.0"), "ocfl_object_1.0\n").unwrap();

        let mut manifest: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut version_map = Map::new();
        for (vid, files) in versions {
            let mut state = Map::new();
            for file in files.iter() {
                let digest = format!("digest-{file}");
                if !manifest.contains_key(&digest) {
                    let physical = format!("{vid}/content/{file}");
                    let content = path.join(&physical);
                    fs::create_dir_all(content.parent().unwrap()).unwrap();
                    fs::write(&content, file.as_bytes()).unwrap();
                    manifest.insert(digest.clone(), vec![physical]);
                }
                state.insert(digest, json!([file]));
            }
            version_map.insert(
                vid.to_string(),
                json!({"created": "2019-01-01T00:00:00Z", "state": state}),
            );
        }

        let head = versions.last().map(|(vid, _)| *vid).unwrap_or("");
        let inventory = json!({
            "id": id,
            "type": "https://ocfl.io/1.0/spec/#inventory",
            "digestAlgorithm": "sha512",
            "head": head,
            "manifest": manifest,
            "versions": version_map,
        });
        fs::write(path.join(INVENTORY_FILE), inventory.to_string()).unwrap();
        path
    }

    /// The single-object root from the two-version scenario: `obj-A` with
    /// `v1 = {a.txt}` and `v2 = {a.txt, b.txt}`.
    pub fn two_versions() -> (Self, PathBuf) {
        let fixture = Self::new();
        let object = fixture.object(
            "ab/obj-A",
            "obj-A",
            &[("v1", &["a.txt"]), ("v2", &["a.txt", "b.txt"])],
        );
        (fixture, object)
    }
}
