use crate::GlobalArgs;
use anyhow::Result;
use modpilot::{AddOutcome, Config};

pub fn run(globals: &GlobalArgs, pack_name: &str, slugs: &[String]) -> Result<()> {
    let paths = globals.paths();
    let mut config = Config::load(&paths.config)?;

    let mut changed = false;
    for outcome in config.add_mods(pack_name, slugs)? {
        match outcome {
            AddOutcome::Added(slug) => {
                println!("Added '{}' to {}", slug, pack_name);
                changed = true;
            }
            AddOutcome::AlreadyPresent(slug) => println!("'{}' already in {}", slug, pack_name),
        }
    }

    if changed {
        config.save(&paths.config)?;
    }
    Ok(())
}
