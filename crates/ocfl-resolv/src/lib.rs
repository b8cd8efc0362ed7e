//! Resolution of OCFL entities through pluggable drivers.
//!
//! A driver knows how to reach one kind of backend (a local filesystem, an
//! object store). Drivers expose two capabilities: walking a bounded scope of
//! entities ([`Walker`]) and opening an object for reading or writing
//! ([`Opener`]). The [`Resolver`] picks the first configured driver that can
//! serve a storage root and forwards calls to it.
//!
//! # Modules
//!
//! - [`error`] — [`ResolvError`], shared by every driver
//! - [`select`] — [`Select`] and [`Location`], the arguments to a walk
//! - [`driver`] — [`Walker`], [`Opener`], [`Session`], [`Driver`]
//! - [`resolver`] — [`Config`] and the [`Resolver`] context

pub mod driver;
pub mod error;
pub mod resolver;
pub mod select;

pub use driver::{Driver, Opener, Options, Session, SessionUser, Visit, Walker};
pub use error::{ResolvError, Result};
pub use ocfl_types::{EntityRef, EntityType};
pub use resolver::{Config, Resolver};
pub use select::{Location, Select};
