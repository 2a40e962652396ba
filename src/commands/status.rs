use super::print_report;
use crate::GlobalArgs;
use anyhow::Result;
use modpilot::{
    Approver, Config, HttpDownloader, ModrinthClient, ReconcileOptions, Reconciler, State,
};

/// Declines everything
struct Decline;

impl Approver for Decline {
    fn approve(&self, _message: &str) -> bool {
        false
    }
}

/// Reconcile without downloading anything; report what `update` would do
pub fn run(globals: &GlobalArgs, pack_name: &str) -> Result<()> {
    let paths = globals.paths();
    let config = Config::load(&paths.config)?;
    let pack = config.pack(pack_name)?;
    let mut state = State::load(&paths.state)?;

    let source = ModrinthClient::from_env()?;
    // With `interactive` off the reconciler neither asks nor downloads
    let downloader = HttpDownloader::new()?;
    let reconciler = Reconciler::new(&source, &downloader, &Decline);

    let options = ReconcileOptions {
        mc_version: globals.mc_version.clone(),
        loader: globals.loader.clone(),
        auto_approve: false,
        interactive: false,
    };

    let report = reconciler.reconcile(
        pack_name,
        pack,
        &mut state,
        &paths.profile_dir(pack_name),
        &options,
    );

    println!(
        "[{}] MC {}, loader {}",
        report.profile, report.mc_version, report.loader
    );
    print_report(&report);
    println!();

    let pending = report.pending_count();
    if pending == 0 && report.failures().next().is_none() {
        println!("✓ All mods are up to date!");
    } else if pending > 0 {
        println!("{} mod(s) need a download. Run 'modpilot update {}'.", pending, pack_name);
    }

    Ok(())
}
