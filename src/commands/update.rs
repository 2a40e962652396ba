use super::{create_spinner_callback, print_report, StdinApprover};
use crate::GlobalArgs;
use anyhow::Result;
use modpilot::{Config, HttpDownloader, ModrinthClient, ReconcileOptions, Reconciler, State};

pub fn run(globals: &GlobalArgs, pack_name: &str) -> Result<()> {
    let paths = globals.paths();
    let config = Config::load(&paths.config)?;
    let pack = config.pack(pack_name)?;

    if let Some(version) = &globals.mc_version {
        println!(
            "Overriding MC version for {}: {} -> {}",
            pack_name, pack.mc_version, version
        );
    }
    if let Some(loader) = &globals.loader {
        println!(
            "Overriding loader for {}: {} -> {}",
            pack_name, pack.loader, loader
        );
    }

    let mut state = State::load(&paths.state)?;
    if state.legacy_records() > 0 {
        println!("Note: state file uses the old format. Mods without a recorded jar will be downloaded again.");
    }

    let source = ModrinthClient::from_env()?;
    let downloader = HttpDownloader::new()?.with_progress(create_spinner_callback());
    let approver = StdinApprover;
    let reconciler = Reconciler::new(&source, &downloader, &approver);

    let options = ReconcileOptions {
        mc_version: globals.mc_version.clone(),
        loader: globals.loader.clone(),
        auto_approve: globals.yes,
        interactive: true,
    };

    let profile_dir = paths.profile_dir(pack_name);
    println!(
        "Checking {} mod(s) in {} for {}/{}...",
        pack.mods.len(),
        pack_name,
        options.mc_version.as_deref().unwrap_or(&pack.mc_version),
        options.loader.as_deref().unwrap_or(&pack.loader)
    );
    println!();

    let report = reconciler.reconcile(pack_name, pack, &mut state, &profile_dir, &options);
    print_report(&report);

    if report.state_changed() {
        state.save(&paths.state)?;
    }

    let failed = report.failures().count();
    println!();
    println!(
        "Update complete. {} downloaded, {} up to date, {} skipped, {} failed.",
        report.downloaded_count(),
        report.up_to_date_count(),
        report.pending_count(),
        failed
    );

    Ok(())
}
