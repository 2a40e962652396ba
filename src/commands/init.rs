use super::prompt_line;
use crate::GlobalArgs;
use anyhow::Result;
use modpilot::{Config, State};

pub fn run(globals: &GlobalArgs) -> Result<()> {
    let paths = globals.paths();
    let mut config = Config::load_or_default(&paths.config)?;

    let version = match &globals.mc_version {
        Some(v) => v.clone(),
        None => prompt_line(&format!(
            "Enter default Minecraft version (optional, e.g. 1.19.2) [{}]",
            config.default_mc_version.as_deref().unwrap_or("")
        ))?,
    };
    if !version.is_empty() {
        config.default_mc_version = Some(version);
    }

    let loader = match &globals.loader {
        Some(l) => l.clone(),
        None => prompt_line(&format!(
            "Enter default mod loader (optional, e.g. fabric/forge) [{}]",
            config.default_loader.as_deref().unwrap_or("")
        ))?,
    };
    if !loader.is_empty() {
        config.default_loader = Some(loader);
    }

    config.save(&paths.config)?;
    println!("✓ Saved config at {}", paths.config.display());

    if !paths.state.exists() {
        State::new().save(&paths.state)?;
        println!("✓ Created default state at {}", paths.state.display());
    }

    Ok(())
}
