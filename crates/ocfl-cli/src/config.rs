use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Settings read from the optional TOML config file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Default storage root.
    #[serde(default)]
    pub root: Option<PathBuf>,
}

impl CliConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load the config file if one was given, then apply the `--root` flag.
    pub fn resolve(path: Option<&Path>, root_flag: Option<PathBuf>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if root_flag.is_some() {
            config.root = root_flag;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        assert!(CliConfig::default().root.is_none());
    }

    #[test]
    fn loads_root_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ocfl.toml");
        std::fs::write(&path, "root = \"/data/ocfl\"\n").unwrap();
        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.root, Some(PathBuf::from("/data/ocfl")));
    }

    #[test]
    fn flag_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ocfl.toml");
        std::fs::write(&path, "root = \"/data/ocfl\"\n").unwrap();
        let config = CliConfig::resolve(Some(&path), Some(PathBuf::from("/other"))).unwrap();
        assert_eq!(config.root, Some(PathBuf::from("/other")));
    }

    #[test]
    fn bad_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ocfl.toml");
        std::fs::write(&path, "root = [").unwrap();
        assert!(CliConfig::load(&path).is_err());
    }
}
