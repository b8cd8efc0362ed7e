//! The capabilities a backend driver provides.

use std::io::Read;

use serde::{Deserialize, Serialize};

use ocfl_types::EntityRef;

use crate::error::Result;
use crate::select::{Location, Select};

/// Callback invoked for each entity a walk selects.
///
/// Returning an error stops the walk; the error is returned from
/// [`Walker::walk`] unchanged.
pub type Visit<'a> = dyn FnMut(EntityRef) -> Result<()> + 'a;

/// Crawls a bounded scope of OCFL entities underneath a start location.
///
/// Given a location and a selection, the walker invokes `visit` for every
/// entity of the selected type within scope. When the location already
/// denotes an entity of the selected type, the walk resolves that single
/// entity instead of enumerating.
pub trait Walker: Send + Sync {
    fn walk(&self, select: Select, location: &Location, visit: &mut Visit<'_>) -> Result<()>;
}

/// Opens an object session for reading or writing.
pub trait Opener: Send + Sync {
    fn open(&self, id: &str, options: &Options) -> Result<Box<dyn Session>>;
}

/// A read/write session bound to a single object version: either an
/// existing version or an uncommitted new one.
pub trait Session {
    /// Put content at the given logical path.
    fn put(&mut self, logical_path: &str, content: &mut dyn Read) -> Result<()>;
}

/// Basic OCFL access through some backend.
pub trait Driver: Walker + Opener {}

impl<T: Walker + Opener> Driver for T {}

/// Options for opening a session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Create the object if it does not exist.
    #[serde(default)]
    pub create: bool,
    /// Fixity digest algorithms to record for new files.
    #[serde(default)]
    pub digest_algorithms: Vec<String>,
    /// Author recorded on new versions.
    #[serde(default)]
    pub user: SessionUser,
}

/// Author of changes made through a session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: String,
    pub address: String,
}
