use crate::GlobalArgs;
use anyhow::Result;
use modpilot::{Config, Error};

pub fn run(globals: &GlobalArgs, name: &str) -> Result<()> {
    let paths = globals.paths();
    let mut config = Config::load(&paths.config)?;

    if config.delete_pack(name).is_none() {
        return Err(Error::ProfileNotFound(name.to_string()).into());
    }
    config.save(&paths.config)?;

    println!("✓ Deleted modpack '{}'", name);
    println!(
        "  Install records in {} and jars in {} were kept.",
        paths.state.display(),
        paths.profile_dir(name).display()
    );
    Ok(())
}
