//! Foundation types for OCFL entity resolution.
//!
//! Every other crate in the workspace depends on `ocfl-types`. It defines the
//! vocabulary shared by drivers and callers: what kind of entity something is,
//! and how a single entity is addressed both logically and physically.
//!
//! # Key Types
//!
//! - [`EntityType`] — Root, Intermediate, Object, Version, File (plus `Any`)
//! - [`EntityRef`] — One entity: logical ID, physical address, parent link

pub mod entity;
pub mod error;
pub mod reference;

pub use entity::EntityType;
pub use error::TypeError;
pub use reference::{EntityRef, Lineage};
