//! Local filesystem driver for OCFL storage roots.
//!
//! Walks combine two addressing systems. Above object granularity the
//! driver descends real directories, probing each one for an object
//! declaration. Once an object root is found, descent switches to the
//! object's inventory: versions and logical files come from the manifest,
//! not from the directory tree.
//!
//! # Modules
//!
//! - [`probe`] — Root and object declaration probes, nearest-root lookup
//! - [`fs_walk`] — Recursive directory enumeration with per-entry pruning
//! - [`scope`] — [`Scope`]: a bounded walk and its containment predicate
//! - [`walk`] — The two-phase walk engine
//! - [`driver`] — [`FileDriver`], the [`ocfl_resolv::Driver`] implementation
//! - [`session`] — [`FileSession`]

pub mod driver;
pub mod fs_walk;
pub mod probe;
pub mod scope;
pub mod session;
pub mod walk;

#[cfg(test)]
pub(crate) mod fixture;

pub use driver::FileDriver;
pub use fs_walk::{fs_walk, Descent, FsEntry};
pub use probe::{find_nearest, is_root_of, Declaration};
pub use scope::Scope;
pub use session::FileSession;
