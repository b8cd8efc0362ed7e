//! Recursive directory enumeration.

use std::io;
use std::path::Path;

use tracing::trace;
use walkdir::WalkDir;

use ocfl_resolv::{ResolvError, Result};

/// What to do after visiting a directory entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Descent {
    /// Descend into the entry's children.
    Continue,
    /// Do not descend into this entry; siblings are still visited.
    Prune,
}

/// A directory entry encountered during [`fs_walk`].
#[derive(Clone, Copy, Debug)]
pub struct FsEntry<'a> {
    pub path: &'a Path,
    /// True for directories, including symlinks resolving to directories.
    pub is_dir: bool,
    pub is_symlink: bool,
    /// Depth below the walk root; the root itself is 0.
    pub depth: usize,
}

/// Walk `root` and everything below it, calling `f` for each entry.
///
/// Symbolic links are followed and sibling order is unspecified. `f`
/// returns [`Descent::Prune`] to skip an entry's children; any error from
/// `f` or from reading a directory ends the walk and is returned as-is.
pub fn fs_walk<F>(root: &Path, mut f: F) -> Result<()>
where
    F: FnMut(&FsEntry<'_>) -> Result<Descent>,
{
    std::fs::metadata(root).map_err(|source| ResolvError::DirectoryAccessFailed {
        path: root.to_path_buf(),
        source,
    })?;

    let mut entries = WalkDir::new(root).follow_links(true).into_iter();
    while let Some(next) = entries.next() {
        let entry = next.map_err(|e| access_failed(root, e))?;
        let visited = FsEntry {
            path: entry.path(),
            is_dir: entry.file_type().is_dir(),
            is_symlink: entry.path_is_symlink(),
            depth: entry.depth(),
        };
        trace!(path = %visited.path.display(), dir = visited.is_dir, "fs entry");

        // skip_current_dir applies to the last yielded directory, so only
        // call it when this entry is one.
        if f(&visited)? == Descent::Prune && visited.is_dir {
            entries.skip_current_dir();
        }
    }
    Ok(())
}

fn access_failed(root: &Path, err: walkdir::Error) -> ResolvError {
    let path = err.path().unwrap_or(root).to_path_buf();
    ResolvError::DirectoryAccessFailed {
        path,
        source: io::Error::from(err),
    }
}
