use crate::GlobalArgs;
use anyhow::Result;
use modpilot::{Config, State};

pub fn run(globals: &GlobalArgs, pack_name: &str) -> Result<()> {
    let paths = globals.paths();
    let config = Config::load(&paths.config)?;
    let pack = config.pack(pack_name)?;
    let state = State::load(&paths.state)?;

    println!(
        "Mods in {} (MC: {}, Loader: {}):",
        pack_name, pack.mc_version, pack.loader
    );
    if pack.mods.is_empty() {
        println!("  (none) Add some with: modpilot add-mod {} <slug>...", pack_name);
        return Ok(());
    }

    for slug in &pack.mods {
        match state.record(pack_name, slug) {
            Some(record) => println!(
                " • {} ({} → {})",
                slug,
                record.version_id,
                record.filename.as_deref().unwrap_or("jar unknown")
            ),
            None => println!(" • {} (not downloaded)", slug),
        }
    }
    Ok(())
}
