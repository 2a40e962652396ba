//! Reconciling a pack directory with its declared mods
//!
//! For every declared mod, in order, the reconciler compares three things:
//! the version the resolver picks today, the install record in [`State`],
//! and whether the recorded jar is still on disk. The comparison yields a
//! [`PackageState`]; anything other than [`PackageState::UpToDate`] needs a
//! download.
//!
//! Failures are per mod. A mod that cannot be resolved or downloaded is
//! reported as [`Outcome::Failed`] and the next mod is processed. An install
//! record is written only after its download succeeded, so state never
//! claims a jar that was not fetched.
//!
//! # Examples
//!
//! ```no_run
//! use modpilot::{AutoApprove, Config, HttpDownloader, ModrinthClient, ReconcileOptions, Reconciler, State};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load("config.json")?;
//! let mut state = State::load("state.json")?;
//! let source = ModrinthClient::from_env()?;
//! let downloader = HttpDownloader::new()?;
//!
//! let reconciler = Reconciler::new(&source, &downloader, &AutoApprove);
//! let options = ReconcileOptions { auto_approve: true, ..Default::default() };
//! let report = reconciler.reconcile(
//!     "survival",
//!     config.pack("survival")?,
//!     &mut state,
//!     "mods/survival".as_ref(),
//!     &options,
//! );
//! if report.state_changed() {
//!     state.save("state.json")?;
//! }
//! # Ok(())
//! # }
//! ```

use crate::config::ModpackConfig;
use crate::download::{file_name_from_url, is_plain_file_name, Downloader};
use crate::error::ErrorKind;
use crate::state::{InstallRecord, State};
use crate::{resolve, Error, Release, ReleaseSource, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// How a declared mod relates to what is installed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageState {
    /// Never downloaded for this pack
    NoRecord,
    /// Installed, but the resolver now picks a different version
    VersionMismatch { installed: String },
    /// Installed version is current, but the jar is gone (or its name unknown)
    FileMissing,
    UpToDate,
}

impl PackageState {
    pub fn needs_download(&self) -> bool {
        !matches!(self, PackageState::UpToDate)
    }
}

/// Classify a mod. Checks run in priority order: no record, version
/// mismatch, missing file, up to date.
pub fn classify(
    record: Option<&InstallRecord>,
    resolved_id: &str,
    file_present: bool,
) -> PackageState {
    match record {
        None => PackageState::NoRecord,
        Some(r) if r.version_id != resolved_id => PackageState::VersionMismatch {
            installed: r.version_id.clone(),
        },
        Some(_) if !file_present => PackageState::FileMissing,
        Some(_) => PackageState::UpToDate,
    }
}

/// Asks the user whether a pending download should go ahead
pub trait Approver {
    fn approve(&self, message: &str) -> bool;
}

/// Approves everything (`--yes`)
pub struct AutoApprove;

impl Approver for AutoApprove {
    fn approve(&self, _message: &str) -> bool {
        true
    }
}

#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    /// Replaces the pack's Minecraft version for this run
    pub mc_version: Option<String>,
    /// Replaces the pack's loader for this run
    pub loader: Option<String>,
    /// Download without asking
    pub auto_approve: bool,
    /// Ask the approver when `auto_approve` is off. When false, needed
    /// downloads are only reported as pending.
    pub interactive: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            mc_version: None,
            loader: None,
            auto_approve: false,
            interactive: true,
        }
    }
}

/// What happened to one mod
#[derive(Debug)]
pub enum Outcome {
    UpToDate {
        release: String,
    },
    Installed {
        release: String,
        path: PathBuf,
    },
    Updated {
        from: String,
        to: String,
        path: PathBuf,
        /// Previous jar that was deleted to make room
        removed: Option<String>,
    },
    Redownloaded {
        release: String,
        path: PathBuf,
    },
    /// Needed a download, but the user declined
    Skipped {
        state: PackageState,
        release: String,
    },
    /// Needs a download; nothing was done (non-interactive run)
    Pending {
        state: PackageState,
        release: String,
    },
    Failed {
        error: Error,
    },
}

impl Outcome {
    pub fn downloaded(&self) -> bool {
        matches!(
            self,
            Outcome::Installed { .. } | Outcome::Updated { .. } | Outcome::Redownloaded { .. }
        )
    }
}

#[derive(Debug)]
pub struct PackageReport {
    pub slug: String,
    pub outcome: Outcome,
}

/// Result of reconciling one pack
#[derive(Debug)]
pub struct Report {
    pub profile: String,
    pub mc_version: String,
    pub loader: String,
    pub entries: Vec<PackageReport>,
}

impl Report {
    /// True if any install record was written
    pub fn state_changed(&self) -> bool {
        self.entries.iter().any(|e| e.outcome.downloaded())
    }

    pub fn downloaded_count(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.downloaded()).count()
    }

    pub fn up_to_date_count(&self) -> usize {
        self.count(|o| matches!(o, Outcome::UpToDate { .. }))
    }

    pub fn pending_count(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Pending { .. } | Outcome::Skipped { .. }))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &Error)> {
        self.entries.iter().filter_map(|e| match &e.outcome {
            Outcome::Failed { error } => Some((e.slug.as_str(), error)),
            _ => None,
        })
    }

    pub fn failures_of_kind(&self, kind: ErrorKind) -> usize {
        self.failures().filter(|(_, e)| e.kind() == kind).count()
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }
}

/// Settings shared by every mod of one reconcile run
struct Target<'r> {
    profile: &'r str,
    mc_version: &'r str,
    loader: &'r str,
    profile_dir: &'r Path,
    options: &'r ReconcileOptions,
}

/// Drives resolution, approval and downloads for a pack
pub struct Reconciler<'a> {
    source: &'a dyn ReleaseSource,
    downloader: &'a dyn Downloader,
    approver: &'a dyn Approver,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        source: &'a dyn ReleaseSource,
        downloader: &'a dyn Downloader,
        approver: &'a dyn Approver,
    ) -> Self {
        Self {
            source,
            downloader,
            approver,
        }
    }

    /// Bring `profile_dir` in line with the mods declared in `pack`.
    ///
    /// Every declared mod is attempted; `state` is updated in memory and
    /// left to the caller to persist.
    pub fn reconcile(
        &self,
        profile: &str,
        pack: &ModpackConfig,
        state: &mut State,
        profile_dir: &Path,
        options: &ReconcileOptions,
    ) -> Report {
        let mc_version = options
            .mc_version
            .clone()
            .unwrap_or_else(|| pack.mc_version.clone());
        let loader = options.loader.clone().unwrap_or_else(|| pack.loader.clone());

        info!(profile, %mc_version, %loader, mods = pack.mods.len(), "reconciling");

        let target = Target {
            profile,
            mc_version: &mc_version,
            loader: &loader,
            profile_dir,
            options,
        };
        let entries = pack
            .mods
            .iter()
            .map(|slug| {
                let outcome = self.reconcile_one(&target, slug, state).unwrap_or_else(|error| {
                    warn!(profile, slug = slug.as_str(), %error, "mod failed");
                    Outcome::Failed { error }
                });
                PackageReport {
                    slug: slug.clone(),
                    outcome,
                }
            })
            .collect();

        Report {
            profile: profile.to_string(),
            mc_version,
            loader,
            entries,
        }
    }

    fn reconcile_one(&self, target: &Target, slug: &str, state: &mut State) -> Result<Outcome> {
        let profile = target.profile;
        let profile_dir = target.profile_dir;
        let record = state.record(profile, slug).cloned();
        // Names that could point outside the pack directory count as unknown
        let recorded_file = record
            .as_ref()
            .and_then(|r| r.filename.clone())
            .filter(|name| is_plain_file_name(name));
        let file_present = recorded_file
            .as_deref()
            .map(|name| profile_dir.join(name).is_file())
            .unwrap_or(false);

        let release = resolve(self.source, slug, target.mc_version, target.loader)?;
        let package_state = classify(record.as_ref(), &release.id, file_present);
        debug!(slug, release = %release.id, state = ?package_state, "classified");

        if !package_state.needs_download() {
            return Ok(Outcome::UpToDate {
                release: release.id,
            });
        }

        if !target.options.auto_approve {
            if !target.options.interactive {
                return Ok(Outcome::Pending {
                    state: package_state,
                    release: release.id,
                });
            }
            if !self.approver.approve(&prompt(slug, &package_state, &release)) {
                return Ok(Outcome::Skipped {
                    state: package_state,
                    release: release.id,
                });
            }
        }

        let file = release.first_file().ok_or_else(|| Error::MissingFiles {
            slug: slug.to_string(),
            release: release.id.clone(),
        })?;
        let incoming = file_name_from_url(&file.url)?;

        let mut removed = None;
        if let Some(old) = recorded_file {
            if old != incoming && remove_stale(&profile_dir.join(&old)) {
                removed = Some(old);
            }
        }

        fs::create_dir_all(profile_dir)
            .map_err(|e| Error::fs("create directory", profile_dir, e))?;

        let path = self.downloader.fetch(&file.url, profile_dir)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or(incoming);

        state.set_record(profile, slug, InstallRecord::new(release.id.clone(), filename));
        info!(profile, slug, release = %release.id, path = %path.display(), "downloaded");

        Ok(match package_state {
            PackageState::NoRecord => Outcome::Installed {
                release: release.id,
                path,
            },
            PackageState::VersionMismatch { installed } => Outcome::Updated {
                from: installed,
                to: release.id,
                path,
                removed,
            },
            PackageState::FileMissing | PackageState::UpToDate => Outcome::Redownloaded {
                release: release.id,
                path,
            },
        })
    }
}

/// Best-effort removal of a superseded jar. Returns true if a file was removed.
fn remove_stale(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed previous jar");
            true
        }
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => false,
        Err(error) => {
            warn!(path = %path.display(), %error, "could not remove previous jar");
            false
        }
    }
}

fn prompt(slug: &str, state: &PackageState, release: &Release) -> String {
    match state {
        PackageState::NoRecord => format!("Install {} ({})?", slug, release.label()),
        PackageState::VersionMismatch { installed } => {
            format!("Update {}: {} → {}?", slug, installed, release.id)
        }
        PackageState::FileMissing | PackageState::UpToDate => format!(
            "Jar for {} ({}) is missing. Download it again?",
            slug,
            release.label()
        ),
    }
}
