use crate::GlobalArgs;
use anyhow::Result;
use modpilot::{Config, State};

pub fn run(globals: &GlobalArgs, pack_name: &str) -> Result<()> {
    let paths = globals.paths();
    let config = Config::load(&paths.config)?;
    let pack = config.pack(pack_name)?;
    let mut state = State::load(&paths.state)?;

    let dropped = state.prune(pack_name, &pack.mods);
    if dropped.is_empty() {
        println!("No stale install records in {}.", pack_name);
        return Ok(());
    }

    state.save(&paths.state)?;
    for slug in &dropped {
        println!("Forgot {}", slug);
    }
    println!();
    println!(
        "Run 'modpilot sync {}' to remove their jars from {}.",
        pack_name,
        paths.profile_dir(pack_name).display()
    );

    Ok(())
}
