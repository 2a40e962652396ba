use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("{} failed for {}: {source}", .action, .path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Request to {url} failed: HTTP {status}")]
    Transport { url: String, status: u16 },

    #[error("Modpack '{0}' not found")]
    ProfileNotFound(String),

    #[error("Project '{0}' not found on Modrinth")]
    ProjectNotFound(String),

    #[error("No compatible version found for {slug} (MC {platform_version}, loader {loader})\n\n\
             Hint: the mod may not support this Minecraft version or loader yet.\n\
             Try overriding with --mc-version / --loader, or check the project page on Modrinth.")]
    NoCompatibleRelease {
        slug: String,
        platform_version: String,
        loader: String,
    },

    #[error("Version {release} of {slug} has no downloadable files")]
    MissingFiles { slug: String, release: String },

    #[error("Config validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    Other(String),
}

/// Coarse classification used when reporting per-mod failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    NoCompatibleRelease,
    Transport,
    Filesystem,
    Validation,
    Other,
}

impl Error {
    pub(crate) fn fs(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ProfileNotFound(_) | Error::ProjectNotFound(_) => {
                ErrorKind::NotFound
            }
            Error::NoCompatibleRelease { .. } | Error::MissingFiles { .. } => {
                ErrorKind::NoCompatibleRelease
            }
            Error::Http(_) | Error::Transport { .. } | Error::Url(_) => ErrorKind::Transport,
            Error::Io(_) | Error::Filesystem { .. } => ErrorKind::Filesystem,
            Error::Validation(_) => ErrorKind::Validation,
            Error::Json(_) | Error::Other(_) => ErrorKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_compatible_release_message_names_target() {
        let err = Error::NoCompatibleRelease {
            slug: "sodium".to_string(),
            platform_version: "1.20.1".to_string(),
            loader: "fabric".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("sodium"));
        assert!(msg.contains("1.20.1"));
        assert!(msg.contains("fabric"));
        assert_eq!(err.kind(), ErrorKind::NoCompatibleRelease);
    }

    #[test]
    fn test_filesystem_error_names_path() {
        let err = Error::fs(
            "remove",
            "/tmp/mods/old.jar",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/tmp/mods/old.jar"));
        assert_eq!(err.kind(), ErrorKind::Filesystem);
    }

    #[test]
    fn test_transport_kind() {
        let err = Error::Transport {
            url: "https://example.invalid/a.jar".to_string(),
            status: 503,
        };
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.to_string().contains("503"));
    }
}
