use crate::GlobalArgs;
use anyhow::Result;
use modpilot::{Config, State};

pub fn run(globals: &GlobalArgs, pack_name: &str, dry_run: bool) -> Result<()> {
    let paths = globals.paths();
    let config = Config::load(&paths.config)?;
    config.pack(pack_name)?;
    let state = State::load(&paths.state)?;

    let dir = paths.profile_dir(pack_name);
    if !state.has_pack(pack_name) {
        println!(
            "⚠ No install records for {}; every jar in {} is considered stray.",
            pack_name,
            dir.display()
        );
    }

    let report = modpilot::sync(&state, pack_name, &dir, dry_run)?;
    if !report.dir_exists {
        println!(
            "Mods directory for {} ({}) does not exist, nothing to sync.",
            pack_name,
            dir.display()
        );
        return Ok(());
    }

    for path in &report.removed {
        if dry_run {
            println!("[DRY RUN] Would remove {}", path.display());
        } else {
            println!("Removing {} (not recorded for {})", path.display(), pack_name);
        }
    }
    for (path, error) in &report.failed {
        eprintln!("  ✗ Failed to remove {}: {}", path.display(), error);
    }

    let removed = report.removed_count();
    if dry_run {
        println!("[DRY RUN] {} file(s) would be removed.", removed);
    } else if removed > 0 {
        println!("Sync complete. Removed {} file(s).", removed);
    } else {
        println!("Sync complete. No files removed.");
    }

    Ok(())
}
