use crate::GlobalArgs;
use anyhow::Result;
use modpilot::{Config, RemoveOutcome};

pub fn run(globals: &GlobalArgs, pack_name: &str, slugs: &[String]) -> Result<()> {
    let paths = globals.paths();
    let mut config = Config::load(&paths.config)?;

    let mut changed = false;
    for outcome in config.remove_mods(pack_name, slugs)? {
        match outcome {
            RemoveOutcome::Removed(slug) => {
                println!("Removed '{}' from {}", slug, pack_name);
                changed = true;
            }
            RemoveOutcome::NotPresent(slug) => println!("'{}' not in {}", slug, pack_name),
        }
    }

    if changed {
        config.save(&paths.config)?;
        println!();
        println!(
            "Jars stay in place until you run 'modpilot prune {0}' and 'modpilot sync {0}'.",
            pack_name
        );
    }
    Ok(())
}
