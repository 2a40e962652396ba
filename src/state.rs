//! Download state: what modpilot believes is installed
//!
//! `state.json` maps each modpack to the mods that were successfully
//! downloaded for it, remembering the Modrinth version id and the jar
//! filename. Records are only written after a download succeeds.
//!
//! Older releases stored a bare version id per mod
//! (`{"pack": {"sodium": "abc123"}}`). Such records still load; their
//! filename is unknown, which makes the next `update` download them again.
//! The same goes for a recorded filename that is not a plain file name
//! (absolute, or containing a separator or `..`).

use crate::download::is_plain_file_name;
use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Last successful download of one mod in one pack
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallRecord {
    pub version_id: String,

    /// Jar filename inside the pack directory; `None` if unknown
    #[serde(serialize_with = "filename_or_empty")]
    pub filename: Option<String>,

    /// When the download completed (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed_at: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecord {
    Current {
        version_id: String,
        #[serde(default)]
        filename: Option<String>,
        #[serde(default)]
        installed_at: Option<String>,
    },
    Legacy(String),
}

fn filename_or_empty<S: serde::Serializer>(
    filename: &Option<String>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(filename.as_deref().unwrap_or(""))
}

impl InstallRecord {
    pub fn new(version_id: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            version_id: version_id.into(),
            filename: Some(filename.into()),
            installed_at: Some(chrono::Utc::now().to_rfc3339()),
        }
    }

    fn from_raw(raw: RawRecord) -> (Self, bool) {
        match raw {
            RawRecord::Current {
                version_id,
                filename,
                installed_at,
            } => (
                Self {
                    version_id,
                    filename: filename.filter(|f| is_plain_file_name(f)),
                    installed_at,
                },
                false,
            ),
            RawRecord::Legacy(version_id) => (
                Self {
                    version_id,
                    filename: None,
                    installed_at: None,
                },
                true,
            ),
        }
    }
}

/// Install records per pack, per mod slug
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct State {
    packs: BTreeMap<String, BTreeMap<String, InstallRecord>>,

    #[serde(skip)]
    legacy_records: usize,
}

impl<'de> Deserialize<'de> for State {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw: Option<BTreeMap<String, Option<BTreeMap<String, RawRecord>>>> =
            Option::deserialize(deserializer)?;

        let mut state = State::default();
        for (pack, mods) in raw.unwrap_or_default() {
            let records = state.packs.entry(pack).or_default();
            for (slug, raw) in mods.unwrap_or_default() {
                let (record, legacy) = InstallRecord::from_raw(raw);
                if legacy {
                    state.legacy_records += 1;
                }
                records.insert(slug, record);
            }
        }
        Ok(state)
    }
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the state file; a missing file is an empty state
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => return Err(Error::fs("read", path, e)),
        };
        Self::parse(&content).map_err(|e| {
            Error::Other(format!("Failed to parse state file {}: {}", path.display(), e))
        })
    }

    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }
        Ok(serde_json::from_str(content)?)
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

    /// Number of records that were loaded from the old bare-string format
    pub fn legacy_records(&self) -> usize {
        self.legacy_records
    }

    pub fn record(&self, pack: &str, slug: &str) -> Option<&InstallRecord> {
        self.packs.get(pack).and_then(|mods| mods.get(slug))
    }

    pub fn set_record(&mut self, pack: &str, slug: &str, record: InstallRecord) {
        self.packs
            .entry(pack.to_string())
            .or_default()
            .insert(slug.to_string(), record);
    }

    pub fn has_pack(&self, pack: &str) -> bool {
        self.packs.contains_key(pack)
    }

    /// Filenames that must be kept in the pack directory
    pub fn expected_filenames(&self, pack: &str) -> BTreeSet<String> {
        self.packs
            .get(pack)
            .map(|mods| mods.values().filter_map(|r| r.filename.clone()).collect())
            .unwrap_or_default()
    }

    /// Drop records for slugs that are no longer declared. Returns the dropped slugs.
    pub fn prune(&mut self, pack: &str, declared: &[String]) -> Vec<String> {
        let Some(mods) = self.packs.get_mut(pack) else {
            return Vec::new();
        };
        let stale: Vec<String> = mods
            .keys()
            .filter(|slug| !declared.contains(slug))
            .cloned()
            .collect();
        for slug in &stale {
            mods.remove(slug);
        }
        stale
    }
}
