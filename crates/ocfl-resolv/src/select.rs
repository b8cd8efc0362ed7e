//! Arguments to a walk: what to select, and where to start.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use ocfl_types::EntityType;

use crate::error::{ResolvError, Result};

/// Desired properties of matching entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Select {
    /// Desired entity type.
    pub entity_type: EntityType,
    /// Only versions and files of each object's head version are in scope.
    #[serde(default)]
    pub head: bool,
}

impl Select {
    /// Select every entity of the given type.
    pub fn of(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            head: false,
        }
    }

    /// Restrict the selection to head versions.
    pub fn head(mut self) -> Self {
        self.head = true;
        self
    }
}

/// Where a walk starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Location {
    /// The whole storage root the driver is configured with.
    Root,
    /// A physical address: a storage root, a directory inside one, an
    /// object root, or a version directory.
    Physical(PathBuf),
    /// Logical coordinates: an object id, then optionally a version id, then
    /// optionally a logical file path.
    Logical(Vec<String>),
}

/// Most coordinates a logical location may have: object, version, file.
pub const MAX_COORDINATES: usize = 3;

impl Location {
    /// Logical coordinates, validated for length.
    pub fn logical<I, S>(coords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let coords: Vec<String> = coords.into_iter().map(Into::into).collect();
        if coords.is_empty() {
            return Ok(Location::Root);
        }
        if coords.len() > MAX_COORDINATES {
            return Err(ResolvError::InvalidLocation(format!(
                "expected at most {MAX_COORDINATES} coordinates (object, version, file), got {}",
                coords.len()
            )));
        }
        if let Some(pos) = coords.iter().position(|c| c.is_empty()) {
            return Err(ResolvError::InvalidLocation(format!(
                "coordinate {} is empty",
                pos + 1
            )));
        }
        Ok(Location::Logical(coords))
    }

    /// Interpret command-line style location arguments.
    ///
    /// No arguments means the whole root. A single argument naming an
    /// existing filesystem path is physical; anything else is a sequence of
    /// logical coordinates.
    pub fn infer(args: &[String]) -> Result<Self> {
        match args {
            [] => Ok(Location::Root),
            [single] if Path::new(single).exists() => Ok(Location::Physical(PathBuf::from(single))),
            _ => Location::logical(args.iter().cloned()),
        }
    }
}
