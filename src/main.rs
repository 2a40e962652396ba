use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use modpilot::config::{DEFAULT_CONFIG_FILE, DEFAULT_MODS_DIR, DEFAULT_STATE_FILE};
use modpilot::Paths;
use tracing_subscriber::EnvFilter;

mod commands;

/// modpilot - a Modrinth modpack manager
///
/// Define modpack stacks in config.json, then list, add, remove, or update mods via the CLI.
#[derive(Parser)]
#[command(name = "modpilot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    globals: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Path to config.json
    #[arg(short, long, global = true, env = "MODPILOT_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Path to state.json
    #[arg(short, long, global = true, env = "MODPILOT_STATE", default_value = DEFAULT_STATE_FILE)]
    pub state: String,

    /// Where to drop downloaded jars (one sub-directory per modpack)
    #[arg(short, long, global = true, env = "MODPILOT_MODS_DIR", default_value = DEFAULT_MODS_DIR)]
    pub mods_dir: String,

    /// Auto-confirm downloads
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Override the Minecraft version (e.g. 1.18.2)
    #[arg(short = 'g', long, global = true)]
    pub mc_version: Option<String>,

    /// Override the mod loader (fabric|forge|quilt|neoforge)
    #[arg(short, long, global = true)]
    pub loader: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    pub fn paths(&self) -> Paths {
        Paths::new(&self.config, &self.state, &self.mods_dir)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config/state files, setting global defaults
    Init,

    /// Create a new modpack, prompting for settings
    CreatePack {
        /// Modpack name
        name: String,
    },

    /// Delete a modpack from the config (state and jars are kept)
    DeletePack {
        /// Modpack name
        name: String,
    },

    /// List all defined modpacks and their settings
    #[command(visible_alias = "lp")]
    ListPacks,

    /// List all mods in a modpack
    #[command(visible_alias = "lm")]
    ListMods {
        /// Modpack name
        pack: String,
    },

    /// Add one or more Modrinth slugs to a modpack
    AddMod {
        /// Modpack name
        pack: String,

        /// Modrinth project slugs
        #[arg(required = true)]
        slugs: Vec<String>,
    },

    /// Remove one or more Modrinth slugs from a modpack
    RemoveMod {
        /// Modpack name
        pack: String,

        /// Modrinth project slugs
        #[arg(required = true)]
        slugs: Vec<String>,
    },

    /// Check and download new versions for a modpack
    #[command(visible_aliases = ["update-pack", "upd"])]
    Update {
        /// Modpack name
        pack: String,
    },

    /// Show which mods of a modpack are up to date, outdated or missing
    Status {
        /// Modpack name
        pack: String,
    },

    /// Remove jars that modpilot did not download for this modpack
    #[command(visible_aliases = ["sync-pack", "clean"])]
    Sync {
        /// Modpack name
        pack: String,

        /// Show what would be removed without removing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Forget install records of mods no longer listed in a modpack
    Prune {
        /// Modpack name
        pack: String,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "modpilot=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.globals.verbose);

    let globals = &cli.globals;
    let result = match cli.command {
        Commands::Init => commands::init::run(globals),
        Commands::CreatePack { name } => commands::create_pack::run(globals, &name),
        Commands::DeletePack { name } => commands::delete_pack::run(globals, &name),
        Commands::ListPacks => commands::list_packs::run(globals),
        Commands::ListMods { pack } => commands::list_mods::run(globals, &pack),
        Commands::AddMod { pack, slugs } => commands::add_mod::run(globals, &pack, &slugs),
        Commands::RemoveMod { pack, slugs } => commands::remove_mod::run(globals, &pack, &slugs),
        Commands::Update { pack } => commands::update::run(globals, &pack),
        Commands::Status { pack } => commands::status::run(globals, &pack),
        Commands::Sync { pack, dry_run } => commands::sync::run(globals, &pack, dry_run),
        Commands::Prune { pack } => commands::prune::run(globals, &pack),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "modpilot", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
