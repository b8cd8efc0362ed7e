//! OCFL object inventories.
//!
//! Every OCFL object root holds an `inventory.json` describing the object:
//! its identifier, its versions, and for each version the mapping from
//! logical file paths to content stored under the object root. This crate
//! models that document and loads it; it does not validate it.
//!
//! # Modules
//!
//! - [`error`] — Error types for inventory loading and lookup
//! - [`inventory`] — [`Inventory`], [`Version`], [`FileEntry`]
//! - [`reader`] — The [`InventoryReader`] trait and [`JsonInventoryReader`]

pub mod error;
pub mod inventory;
pub mod reader;

pub use error::{InventoryError, InventoryResult};
pub use inventory::{FileEntry, Inventory, User, Version};
pub use reader::{InventoryReader, JsonInventoryReader, INVENTORY_FILE};
