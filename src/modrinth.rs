//! Modrinth API client
//!
//! Lists the published versions of a project through
//! `GET /v2/project/{slug}/version`. Modrinth returns versions newest first;
//! the resolver relies on that order but never re-sorts.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// Public Modrinth API
pub const DEFAULT_API_URL: &str = "https://api.modrinth.com";

/// Environment variable overriding [`DEFAULT_API_URL`]
pub const API_URL_ENV: &str = "MODPILOT_API_URL";

/// A published version of a Modrinth project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_number: Option<String>,

    #[serde(default)]
    pub game_versions: Vec<String>,

    #[serde(default)]
    pub loaders: Vec<String>,

    /// Downloadable files; the first one is the one that gets installed
    #[serde(default)]
    pub files: Vec<ReleaseFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseFile {
    pub url: String,
    pub filename: String,
    #[serde(default)]
    pub primary: bool,
}

impl Release {
    pub fn supports(&self, platform_version: &str, loader: &str) -> bool {
        self.game_versions.iter().any(|v| v == platform_version)
            && self.loaders.iter().any(|l| l == loader)
    }

    pub fn first_file(&self) -> Option<&ReleaseFile> {
        self.files.first()
    }

    /// Human-readable version label, falling back to the id
    pub fn label(&self) -> &str {
        self.version_number.as_deref().unwrap_or(&self.id)
    }
}

/// Source of release listings for a project
pub trait ReleaseSource {
    /// All releases of `slug`, in the source's native order
    fn list_releases(&self, slug: &str, loader: &str, platform_version: &str)
        -> Result<Vec<Release>>;
}

pub struct ModrinthClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl ModrinthClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("modpilot/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Client for `MODPILOT_API_URL`, or the public API
    pub fn from_env() -> Result<Self> {
        let base = std::env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(base)
    }

    fn versions_url(&self, slug: &str, loader: &str, platform_version: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| Error::Other(format!("Invalid API base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(&["v2", "project", slug, "version"]);
        url.query_pairs_mut()
            .append_pair("loaders", &serde_json::to_string(&[loader])?)
            .append_pair("game_versions", &serde_json::to_string(&[platform_version])?);
        Ok(url)
    }
}

impl ReleaseSource for ModrinthClient {
    fn list_releases(
        &self,
        slug: &str,
        loader: &str,
        platform_version: &str,
    ) -> Result<Vec<Release>> {
        let url = self.versions_url(slug, loader, platform_version)?;
        debug!(%url, "listing versions");

        let response = self.client.get(url.as_str()).send()?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::ProjectNotFound(slug.to_string()));
        }
        if !status.is_success() {
            return Err(Error::Transport {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let releases: Vec<Release> = response.json()?;
        debug!(slug, count = releases.len(), "received versions");
        Ok(releases)
    }
}
