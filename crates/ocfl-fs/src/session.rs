//! Object sessions on the local filesystem.

use std::io::Read;

use tracing::debug;

use ocfl_resolv::{Options, ResolvError, Result, Session};
use ocfl_types::EntityRef;

/// A session bound to one object on the local filesystem.
///
/// Writing new versions is not implemented by this driver; `put` reports
/// `Unsupported`.
#[derive(Debug)]
pub struct FileSession {
    object: EntityRef,
    options: Options,
}

impl FileSession {
    pub(crate) fn new(object: EntityRef, options: Options) -> Self {
        Self { object, options }
    }

    /// The object this session is bound to.
    pub fn object(&self) -> &EntityRef {
        &self.object
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}

impl Session for FileSession {
    fn put(&mut self, logical_path: &str, _content: &mut dyn Read) -> Result<()> {
        debug!(object = %self.object.id, path = logical_path, "put rejected");
        Err(ResolvError::Unsupported("put"))
    }
}
