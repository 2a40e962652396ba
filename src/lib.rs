//! modpilot - a Modrinth modpack manager
//!
//! Modpacks are declared in `config.json`: each names a Minecraft version, a
//! mod loader and a list of Modrinth project slugs. modpilot keeps a mods
//! directory per pack in line with that declaration:
//!
//! - Picks the newest release compatible with the pack's version and loader
//! - Remembers which release and jar were downloaded in `state.json`
//! - Re-downloads jars that went missing, replaces outdated ones
//! - Removes jars it did not download
//!
//! # Examples
//!
//! ```no_run
//! use modpilot::{sync, Config, State};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load("config.json")?;
//! let state = State::load("state.json")?;
//!
//! for name in config.modpacks.keys() {
//!     let report = sync(&state, name, format!("mods/{}", name).as_ref(), true)?;
//!     println!("{}: {} stray jar(s)", name, report.removed_count());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`config`] - Declared modpacks and file locations
//! - [`state`] - Install records of downloaded jars
//! - [`modrinth`] - Modrinth API client
//! - [`resolver`] - Picking a compatible release
//! - [`download`] - Fetching jars
//! - [`reconcile`] - Deciding and applying per-mod actions
//! - [`sync`] - Cleaning pack directories
//! - [`error`] - Error types and result handling

pub mod config;
pub mod download;
pub mod error;
pub mod modrinth;
pub mod reconcile;
pub mod resolver;
pub mod state;
pub mod sync;

pub use config::{AddOutcome, Config, ModpackConfig, Paths, RemoveOutcome};
pub use download::{Downloader, HttpDownloader, ProgressCallback};
pub use error::{Error, ErrorKind, Result};
pub use modrinth::{ModrinthClient, Release, ReleaseFile, ReleaseSource};
pub use reconcile::{
    classify, Approver, AutoApprove, Outcome, PackageReport, PackageState, ReconcileOptions,
    Reconciler, Report,
};
pub use resolver::{resolve, select_compatible};
pub use state::{InstallRecord, State};
pub use sync::{sync, SyncReport};
