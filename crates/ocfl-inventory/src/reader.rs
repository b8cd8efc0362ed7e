//! Loading inventories from object roots.

use std::path::Path;

use tracing::trace;

use crate::error::{InventoryError, InventoryResult};
use crate::inventory::Inventory;

/// Name of the inventory file at the top of every object root.
pub const INVENTORY_FILE: &str = "inventory.json";

/// Source of parsed inventories.
///
/// Implementations must be thread-safe so a single reader can serve every
/// object visited during a walk.
pub trait InventoryReader: Send + Sync {
    /// Load the inventory of the object rooted at `object_root`.
    fn load(&self, object_root: &Path) -> InventoryResult<Inventory>;
}

/// Reads `inventory.json` from the object root on the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonInventoryReader;

impl InventoryReader for JsonInventoryReader {
    fn load(&self, object_root: &Path) -> InventoryResult<Inventory> {
        let path = object_root.join(INVENTORY_FILE);
        trace!(path = %path.display(), "loading inventory");
        let bytes = std::fs::read(&path).map_err(|source| InventoryError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| InventoryError::Parse { path, source })
    }
}
