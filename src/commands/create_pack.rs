use super::prompt_line;
use crate::GlobalArgs;
use anyhow::Result;
use modpilot::Config;

/// Use the flag if given, else prompt; an empty answer falls back to `default`
fn setting(flag: &Option<String>, question: &str, default: Option<&str>) -> Result<String> {
    if let Some(value) = flag {
        return Ok(value.clone());
    }
    let question = match default {
        Some(d) => format!("{} (default: {})", question, d),
        None => question.to_string(),
    };
    let answer = prompt_line(&question)?;
    if answer.is_empty() {
        Ok(default.unwrap_or_default().to_string())
    } else {
        Ok(answer)
    }
}

pub fn run(globals: &GlobalArgs, name: &str) -> Result<()> {
    let paths = globals.paths();
    let mut config = Config::load_or_default(&paths.config)?;

    if config.modpacks.contains_key(name) {
        println!("⚠ Modpack '{}' already exists", name);
        return Ok(());
    }

    let mc_version = setting(
        &globals.mc_version,
        &format!("Enter Minecraft version for {}", name),
        config.default_mc_version.as_deref(),
    )?;
    let loader = setting(
        &globals.loader,
        &format!("Enter mod loader for {} (e.g., fabric, forge)", name),
        config.default_loader.as_deref(),
    )?;

    config.create_pack(name, &mc_version, &loader)?;
    config.save(&paths.config)?;

    let pack = config.pack(name)?;
    println!(
        "✓ Created modpack '{}' with MC {} and loader {}",
        name, pack.mc_version, pack.loader
    );
    Ok(())
}
