//! Picking the version of a mod to install
//!
//! The first release in the source's order that lists both the requested
//! Minecraft version and the requested loader wins. There is no semver
//! comparison and no re-sorting: Modrinth lists newest first, so "first
//! compatible" means "newest compatible".
//!
//! # Examples
//!
//! ```no_run
//! use modpilot::{resolve, ModrinthClient};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ModrinthClient::from_env()?;
//! let release = resolve(&client, "sodium", "1.20.1", "fabric")?;
//! println!("sodium -> {}", release.label());
//! # Ok(())
//! # }
//! ```

use crate::{Error, Release, ReleaseSource, Result};
use tracing::debug;

/// First release compatible with `platform_version` and `loader`
pub fn select_compatible<'a>(
    releases: &'a [Release],
    platform_version: &str,
    loader: &str,
) -> Option<&'a Release> {
    releases
        .iter()
        .find(|release| release.supports(platform_version, loader))
}

/// Fetch the releases of `slug` and pick the one to install
///
/// Fails with [`Error::NoCompatibleRelease`] when the project has no
/// releases at all, or none matching both filters.
pub fn resolve(
    source: &dyn ReleaseSource,
    slug: &str,
    platform_version: &str,
    loader: &str,
) -> Result<Release> {
    let releases = source.list_releases(slug, loader, platform_version)?;
    debug!(slug, candidates = releases.len(), "resolving");

    select_compatible(&releases, platform_version, loader)
        .cloned()
        .ok_or_else(|| Error::NoCompatibleRelease {
            slug: slug.to_string(),
            platform_version: platform_version.to_string(),
            loader: loader.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReleaseFile;

    fn release(id: &str, versions: &[&str], loaders: &[&str]) -> Release {
        Release {
            id: id.to_string(),
            version_number: None,
            game_versions: versions.iter().map(|s| s.to_string()).collect(),
            loaders: loaders.iter().map(|s| s.to_string()).collect(),
            files: vec![ReleaseFile {
                url: format!("https://cdn.example.com/{}.jar", id),
                filename: format!("{}.jar", id),
                primary: true,
            }],
        }
    }

    struct StaticSource(Vec<Release>);

    impl ReleaseSource for StaticSource {
        fn list_releases(&self, _: &str, _: &str, _: &str) -> Result<Vec<Release>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_first_compatible_wins() {
        let releases = vec![
            release("r3", &["1.21"], &["fabric"]),
            release("r2", &["1.20.1"], &["fabric", "quilt"]),
            release("r1", &["1.20.1"], &["fabric"]),
        ];
        let picked = select_compatible(&releases, "1.20.1", "fabric").unwrap();
        assert_eq!(picked.id, "r2");
    }

    #[test]
    fn test_both_filters_must_match() {
        // r2 has the version but not the loader, r1 the loader but not the version
        let releases = vec![
            release("r2", &["1.20.1"], &["forge"]),
            release("r1", &["1.19.2"], &["fabric"]),
        ];
        assert!(select_compatible(&releases, "1.20.1", "fabric").is_none());
    }

    #[test]
    fn test_never_falls_back_to_first_release() {
        let source = StaticSource(vec![release("latest", &["1.21"], &["neoforge"])]);
        let err = resolve(&source, "alpha", "1.20.1", "fabric").unwrap_err();
        match err {
            Error::NoCompatibleRelease {
                slug,
                platform_version,
                loader,
            } => {
                assert_eq!(slug, "alpha");
                assert_eq!(platform_version, "1.20.1");
                assert_eq!(loader, "fabric");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_listing_is_no_compatible_release() {
        let source = StaticSource(vec![]);
        assert!(matches!(
            resolve(&source, "alpha", "1.20.1", "fabric"),
            Err(Error::NoCompatibleRelease { .. })
        ));
    }

    #[test]
    fn test_version_match_is_exact() {
        let releases = vec![release("r1", &["1.20"], &["fabric"])];
        assert!(select_compatible(&releases, "1.20.1", "fabric").is_none());
        assert!(select_compatible(&releases, "1.20", "Fabric").is_none());
    }
}
