//! Fetching mod jars into a pack directory
//!
//! The file name on disk is the last path segment of the download URL.
//! Bytes go to a `.part` file first and are renamed into place once the
//! transfer completes, so an interrupted download never leaves a jar that
//! looks complete.

use crate::{Error, Result};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Progress callback for downloads
///
/// Called with:
/// - `message`: Description of current operation (e.g., "Downloading sodium.jar")
/// - `current`: Bytes written so far
/// - `total`: Expected size in bytes, or 0 if unknown
pub type ProgressCallback = Arc<dyn Fn(&str, u64, u64) + Send + Sync>;

/// Something that can place the file behind a URL into a directory
pub trait Downloader {
    /// Download `url` into `dest_dir`, returning the path written
    fn fetch(&self, url: &str, dest_dir: &Path) -> Result<PathBuf>;
}

/// Final path segment of `url`, percent-decoded
pub fn file_name_from_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url)?;
    let segment = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::Other(format!("Cannot derive a file name from {}", url)))?;

    let decoded = urlencoding::decode(segment)
        .map_err(|_| Error::Other(format!("File name in {} is not valid UTF-8", url)))?
        .into_owned();
    if !is_plain_file_name(&decoded) {
        return Err(Error::Other(format!("Refusing unsafe file name from {}", url)));
    }
    Ok(decoded)
}

/// True if `name` is a single ordinary path component, so joining it onto a
/// directory can never leave that directory
pub fn is_plain_file_name(name: &str) -> bool {
    if name.contains('/') || name.contains('\\') {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

pub struct HttpDownloader {
    client: reqwest::blocking::Client,
    progress: Option<ProgressCallback>,
}

impl HttpDownloader {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("modpilot/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            progress: None,
        })
    }

    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    fn stream_to(
        &self,
        mut body: impl Read,
        dest: &Path,
        name: &str,
        total: u64,
    ) -> Result<()> {
        let mut file = File::create(dest).map_err(|e| Error::fs("create", dest, e))?;
        let mut buf = [0u8; 64 * 1024];
        let mut written = 0u64;
        let message = format!("Downloading {}", name);

        loop {
            let n = match body.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::fs("read response for", dest, e)),
            };
            file.write_all(&buf[..n])
                .map_err(|e| Error::fs("write", dest, e))?;
            written += n as u64;
            if let Some(cb) = &self.progress {
                cb(&message, written, total);
            }
        }
        file.flush().map_err(|e| Error::fs("write", dest, e))?;

        if let Some(cb) = &self.progress {
            cb(&format!("Downloaded {}", name), written, written);
        }
        Ok(())
    }
}

impl Downloader for HttpDownloader {
    fn fetch(&self, url: &str, dest_dir: &Path) -> Result<PathBuf> {
        let name = file_name_from_url(url)?;
        fs::create_dir_all(dest_dir).map_err(|e| Error::fs("create directory", dest_dir, e))?;

        debug!(url, dest = %dest_dir.display(), "downloading");
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let total = response.content_length().unwrap_or(0);

        let final_path = dest_dir.join(&name);
        let part_path = dest_dir.join(format!("{}.part", name));

        if let Err(e) = self.stream_to(response, &part_path, &name, total) {
            if let Err(cleanup) = fs::remove_file(&part_path) {
                warn!(path = %part_path.display(), error = %cleanup, "could not remove partial download");
            }
            return Err(e);
        }

        fs::rename(&part_path, &final_path).map_err(|e| Error::fs("rename", &part_path, e))?;
        debug!(path = %final_path.display(), "download complete");
        Ok(final_path)
    }
}
