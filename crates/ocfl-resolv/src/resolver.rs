//! The resolver context: a storage root bound to the driver serving it.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use ocfl_types::{EntityRef, EntityType};

use crate::driver::{Driver, Options, Session, Visit};
use crate::error::{ResolvError, Result};
use crate::select::{Location, Select};

/// Resolver configuration.
#[derive(Clone, Default)]
pub struct Config {
    /// Storage root to resolve entities under.
    pub root: PathBuf,
    /// Candidate drivers, tried in order.
    pub drivers: Vec<Arc<dyn Driver>>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("root", &self.root)
            .field("drivers", &self.drivers.len())
            .finish()
    }
}

/// Context for resolving OCFL entities under one storage root.
pub struct Resolver {
    root: EntityRef,
    driver: Arc<dyn Driver>,
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver").field("root", &self.root).finish()
    }
}

impl Resolver {
    /// Bind the configured root to the first driver that can walk it as a
    /// storage root.
    pub fn init(config: Config) -> Result<Self> {
        if config.root.as_os_str().is_empty() {
            return Err(ResolvError::NoSuitableDriver { root: config.root });
        }

        let location = Location::Physical(config.root.clone());
        for (index, driver) in config.drivers.iter().enumerate() {
            let mut found = None;
            let outcome = driver.walk(Select::of(EntityType::Root), &location, &mut |r| {
                found = Some(r);
                Ok(())
            });
            match (outcome, found) {
                (Ok(()), Some(root)) => {
                    debug!(driver = index, root = %root.addr, "resolver bound to driver");
                    return Ok(Self {
                        root,
                        driver: Arc::clone(driver),
                    });
                }
                (Ok(()), None) => {
                    debug!(driver = index, "driver found no root");
                }
                (Err(e), _) => {
                    warn!(driver = index, error = %e, "driver cannot serve root");
                }
            }
        }

        Err(ResolvError::NoSuitableDriver { root: config.root })
    }

    /// The storage root this resolver is bound to.
    pub fn root(&self) -> &EntityRef {
        &self.root
    }

    /// Walk entities through the bound driver.
    pub fn walk(&self, select: Select, location: &Location, visit: &mut Visit<'_>) -> Result<()> {
        self.driver.walk(select, location, visit)
    }

    /// Open an object session through the bound driver.
    pub fn open(&self, id: &str, options: &Options) -> Result<Box<dyn Session>> {
        self.driver.open(id, options)
    }
}
