//! Declared modpack configuration and file locations
//!
//! The config file (`config.json` by default) declares every modpack: the
//! Minecraft version, the mod loader and the ordered list of Modrinth slugs.
//! It is only ever changed by explicit user commands; reconciliation reads it
//! and never writes it back.
//!
//! # Examples
//!
//! ```no_run
//! use modpilot::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = Config::load("config.json")?;
//! config.add_mods("survival", &["sodium".to_string()])?;
//! config.save("config.json")?;
//! # Ok(())
//! # }
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "config.json";
pub const DEFAULT_STATE_FILE: &str = "state.json";
pub const DEFAULT_MODS_DIR: &str = "mods";

/// Top-level structure of `config.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Minecraft version offered when creating a new pack
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_mc_version: Option<String>,

    /// Mod loader offered when creating a new pack
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_loader: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub modpacks: BTreeMap<String, ModpackConfig>,
}

/// Settings for a single modpack
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModpackConfig {
    #[serde(default)]
    pub mc_version: String,

    #[serde(default)]
    pub loader: String,

    /// Modrinth slugs, in the order they were added
    #[serde(default)]
    pub mods: Vec<String>,
}

/// Result of adding a single slug to a pack
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(String),
    AlreadyPresent(String),
}

/// Result of removing a single slug from a pack
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed(String),
    NotPresent(String),
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, ModpackConfig>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let packs: Option<BTreeMap<String, ModpackConfig>> = Option::deserialize(deserializer)?;
    Ok(packs.unwrap_or_default())
}

impl Config {
    /// Load and validate the config file
    ///
    /// A missing file is an error here; use [`Config::load_or_default`] for
    /// commands that may create the file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Other(format!(
                    "Config file {} not found. Run 'modpilot init' first.",
                    path.display()
                ))
            } else {
                Error::fs("read", path, e)
            }
        })?;
        Self::parse(&content)
    }

    /// Load the config file, or start from an empty config if it doesn't exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse and validate config JSON
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Every declared pack must name a Minecraft version and a loader
    pub fn validate(&self) -> Result<()> {
        for (name, pack) in &self.modpacks {
            if pack.mc_version.trim().is_empty() {
                return Err(Error::Validation(format!(
                    "modpack '{}' is missing 'mc_version'",
                    name
                )));
            }
            if pack.loader.trim().is_empty() {
                return Err(Error::Validation(format!(
                    "modpack '{}' is missing 'loader'",
                    name
                )));
            }
        }
        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::fs("create directory", parent, e))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| Error::fs("write", path, e))?;
        Ok(())
    }

    pub fn pack(&self, name: &str) -> Result<&ModpackConfig> {
        self.modpacks
            .get(name)
            .ok_or_else(|| Error::ProfileNotFound(name.to_string()))
    }

    fn pack_mut(&mut self, name: &str) -> Result<&mut ModpackConfig> {
        self.modpacks
            .get_mut(name)
            .ok_or_else(|| Error::ProfileNotFound(name.to_string()))
    }

    /// Declare a new pack. Returns false if a pack with this name already exists.
    pub fn create_pack(&mut self, name: &str, mc_version: &str, loader: &str) -> Result<bool> {
        if self.modpacks.contains_key(name) {
            return Ok(false);
        }
        let pack = ModpackConfig {
            mc_version: mc_version.trim().to_string(),
            loader: loader.trim().to_string(),
            mods: Vec::new(),
        };
        if pack.mc_version.is_empty() {
            return Err(Error::Validation("Minecraft version cannot be empty".to_string()));
        }
        if pack.loader.is_empty() {
            return Err(Error::Validation("mod loader cannot be empty".to_string()));
        }
        self.modpacks.insert(name.to_string(), pack);
        Ok(true)
    }

    /// Remove a pack from the config.
    ///
    /// Install records and downloaded files are left alone.
    pub fn delete_pack(&mut self, name: &str) -> Option<ModpackConfig> {
        self.modpacks.remove(name)
    }

    pub fn add_mods(&mut self, name: &str, slugs: &[String]) -> Result<Vec<AddOutcome>> {
        let pack = self.pack_mut(name)?;
        let outcomes = slugs
            .iter()
            .map(|slug| {
                if pack.mods.contains(slug) {
                    AddOutcome::AlreadyPresent(slug.clone())
                } else {
                    pack.mods.push(slug.clone());
                    AddOutcome::Added(slug.clone())
                }
            })
            .collect();
        Ok(outcomes)
    }

    pub fn remove_mods(&mut self, name: &str, slugs: &[String]) -> Result<Vec<RemoveOutcome>> {
        let pack = self.pack_mut(name)?;
        let outcomes = slugs
            .iter()
            .map(|slug| {
                let before = pack.mods.len();
                pack.mods.retain(|m| m != slug);
                if pack.mods.len() == before {
                    RemoveOutcome::NotPresent(slug.clone())
                } else {
                    RemoveOutcome::Removed(slug.clone())
                }
            })
            .collect();
        Ok(outcomes)
    }
}

/// Locations of the config file, the state file and the mods directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub config: PathBuf,
    pub state: PathBuf,
    pub mods_dir: PathBuf,
}

impl Paths {
    /// Build paths from user input, expanding a leading `~`
    pub fn new(config: &str, state: &str, mods_dir: &str) -> Self {
        Self {
            config: expand(config),
            state: expand(state),
            mods_dir: expand(mods_dir),
        }
    }

    /// Directory holding the jars of one pack
    pub fn profile_dir(&self, name: &str) -> PathBuf {
        self.mods_dir.join(name)
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}
