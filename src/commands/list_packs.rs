use crate::GlobalArgs;
use anyhow::Result;
use modpilot::Config;

pub fn run(globals: &GlobalArgs) -> Result<()> {
    let config = Config::load(globals.paths().config)?;

    if config.modpacks.is_empty() {
        println!("No modpacks defined.");
        println!();
        println!("Create one with: modpilot create-pack <name>");
        return Ok(());
    }

    println!("Modpacks:");
    for (name, pack) in &config.modpacks {
        println!(
            " • {} (MC: {}, Loader: {}, {} mod{})",
            name,
            pack.mc_version,
            pack.loader,
            pack.mods.len(),
            if pack.mods.len() == 1 { "" } else { "s" }
        );
    }
    Ok(())
}
