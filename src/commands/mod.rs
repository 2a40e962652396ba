pub mod add_mod;
pub mod create_pack;
pub mod delete_pack;
pub mod init;
pub mod list_mods;
pub mod list_packs;
pub mod prune;
pub mod remove_mod;
pub mod status;
pub mod sync;
pub mod update;

use indicatif::{ProgressBar, ProgressStyle};
use modpilot::{Approver, Error, Outcome, PackageState, ProgressCallback, Report};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Asks on stdin; anything but `y`/`yes` declines
pub struct StdinApprover;

impl Approver for StdinApprover {
    fn approve(&self, message: &str) -> bool {
        print!("    {} (y/N) ", message);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

/// Print `message` and read one trimmed line from stdin
pub fn prompt_line(message: &str) -> io::Result<String> {
    print!("{}: ", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Create an indicatif-based progress callback for CLI display.
///
/// A fresh spinner is started for each download and finished once the
/// download reports completion.
pub fn create_spinner_callback() -> ProgressCallback {
    let current: Arc<Mutex<Option<ProgressBar>>> = Arc::new(Mutex::new(None));

    Arc::new(move |msg: &str, done: u64, total: u64| {
        let Ok(mut slot) = current.lock() else {
            return;
        };
        let spinner = slot.get_or_insert_with(|| {
            let s = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("    {spinner:.green} {msg}") {
                s.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
            }
            s.enable_steady_tick(std::time::Duration::from_millis(80));
            s
        });

        if done >= total && msg.starts_with("Downloaded") {
            spinner.finish_and_clear();
            *slot = None;
        } else {
            spinner.set_message(format!("{} ({} KiB)", msg, done / 1024));
        }
    })
}

fn describe(state: &PackageState, release: &str) -> String {
    match state {
        PackageState::NoRecord => format!("not installed (latest: {})", release),
        PackageState::VersionMismatch { installed } => {
            format!("outdated: {} → {}", installed, release)
        }
        PackageState::FileMissing => format!("jar missing ({})", release),
        PackageState::UpToDate => format!("up to date ({})", release),
    }
}

fn print_failure(slug: &str, error: &Error) {
    eprintln!("  ✗ {}: {}", slug, error);
}

/// Print one line per mod of a reconciliation report
pub fn print_report(report: &Report) {
    for entry in &report.entries {
        let slug = &entry.slug;
        match &entry.outcome {
            Outcome::UpToDate { release } => println!("  ✓ {} up to date ({})", slug, release),
            Outcome::Installed { release, path } => {
                println!("  ✓ {} installed {} → {}", slug, release, path.display())
            }
            Outcome::Updated {
                from,
                to,
                path,
                removed,
            } => {
                println!("  ✓ {} updated {} → {} ({})", slug, from, to, path.display());
                if let Some(old) = removed {
                    println!("    removed {}", old);
                }
            }
            Outcome::Redownloaded { release, path } => println!(
                "  ✓ {} re-downloaded missing jar {} → {}",
                slug,
                release,
                path.display()
            ),
            Outcome::Skipped { state, release } => {
                println!("  - {} skipped, {}", slug, describe(state, release))
            }
            Outcome::Pending { state, release } => {
                println!("  ⚠ {} {}", slug, describe(state, release))
            }
            Outcome::Failed { error } => print_failure(slug, error),
        }
    }
}
