//! End-to-end tests of the modpilot binary.
//!
//! Every test points `--config`, `--state` and `--mods-dir` into its own
//! temp directory so nothing touches the working tree.

use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config.json")
    }

    fn state(&self) -> PathBuf {
        self.dir.path().join("state.json")
    }

    fn mods(&self) -> PathBuf {
        self.dir.path().join("mods")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_modpilot"));
        cmd.env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.config())
            .arg("--state")
            .arg(self.state())
            .arg("--mods-dir")
            .arg(self.mods());
        cmd
    }

    fn write_config(&self, json: &str) {
        fs::write(self.config(), json).expect("Failed to write config");
    }

    fn write_state(&self, json: &str) {
        fs::write(self.state(), json).expect("Failed to write state");
    }

    fn touch(&self, pack: &str, name: &str) -> PathBuf {
        let dir = self.mods().join(pack);
        fs::create_dir_all(&dir).expect("Failed to create pack dir");
        let path = dir.join(name);
        fs::write(&path, "jar").expect("Failed to write jar");
        path
    }

    fn read_config(&self) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(self.config()).unwrap()).unwrap()
    }
}

fn one_pack_config(mods: &[&str]) -> String {
    serde_json::json!({
        "modpacks": {
            "P": {"mc_version": "1.20.1", "loader": "fabric", "mods": mods}
        }
    })
    .to_string()
}

// ============================================================================
// Config management
// ============================================================================

#[test]
fn test_init_with_flags_writes_defaults() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["-g", "1.20.1", "-l", "fabric", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved config"));

    let config = ws.read_config();
    assert_eq!(config["default_mc_version"], "1.20.1");
    assert_eq!(config["default_loader"], "fabric");
    assert!(ws.state().exists());
}

#[test]
fn test_create_and_list_packs() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["create-pack", "P", "-g", "1.20.1", "-l", "fabric"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created modpack 'P'"));

    ws.cmd()
        .arg("create-pack")
        .arg("P")
        .args(["-g", "1.21", "-l", "neoforge"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    ws.cmd()
        .arg("lp")
        .assert()
        .success()
        .stdout(predicate::str::contains("P (MC: 1.20.1, Loader: fabric, 0 mods)"));
}

#[test]
fn test_list_packs_empty() {
    let ws = Workspace::new();
    ws.write_config("{}");

    ws.cmd()
        .arg("list-packs")
        .assert()
        .success()
        .stdout(predicate::str::contains("No modpacks defined."));
}

#[test]
fn test_add_list_and_remove_mods() {
    let ws = Workspace::new();
    ws.write_config(&one_pack_config(&[]));

    ws.cmd()
        .args(["add-mod", "P", "sodium", "lithium", "sodium"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 'sodium' to P"))
        .stdout(predicate::str::contains("'sodium' already in P"));

    assert_eq!(
        ws.read_config()["modpacks"]["P"]["mods"],
        serde_json::json!(["sodium", "lithium"])
    );

    ws.cmd()
        .args(["lm", "P"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sodium (not downloaded)"))
        .stdout(predicate::str::contains("lithium (not downloaded)"));

    ws.cmd()
        .args(["remove-mod", "P", "sodium", "iris"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 'sodium' from P"))
        .stdout(predicate::str::contains("'iris' not in P"));

    assert_eq!(
        ws.read_config()["modpacks"]["P"]["mods"],
        serde_json::json!(["lithium"])
    );
}

#[test]
fn test_list_mods_shows_install_records() {
    let ws = Workspace::new();
    ws.write_config(&one_pack_config(&["sodium"]));
    ws.write_state(r#"{"P": {"sodium": {"version_id": "abc", "filename": "sodium-1.jar"}}}"#);

    ws.cmd()
        .args(["list-mods", "P"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sodium (abc → sodium-1.jar)"));
}

#[test]
fn test_delete_pack_keeps_state_and_jars() {
    let ws = Workspace::new();
    ws.write_config(&one_pack_config(&["sodium"]));
    ws.write_state(r#"{"P": {"sodium": {"version_id": "abc", "filename": "sodium-1.jar"}}}"#);
    let jar = ws.touch("P", "sodium-1.jar");

    ws.cmd()
        .args(["delete-pack", "P"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted modpack 'P'"));

    assert!(ws.read_config()["modpacks"].get("P").is_none());
    assert!(fs::read_to_string(ws.state()).unwrap().contains("sodium-1.jar"));
    assert!(jar.exists());

    ws.cmd()
        .args(["delete-pack", "P"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_config_asks_for_init() {
    let ws = Workspace::new();

    ws.cmd()
        .arg("list-packs")
        .assert()
        .failure()
        .stderr(predicate::str::contains("modpilot init"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let ws = Workspace::new();
    ws.write_config(r#"{"modpacks": {"P": {"mc_version": "1.20.1", "mods": []}}}"#);

    ws.cmd()
        .arg("list-packs")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config validation failed"));
}

#[test]
fn test_unknown_pack() {
    let ws = Workspace::new();
    ws.write_config(&one_pack_config(&[]));

    ws.cmd()
        .args(["list-mods", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nope"));
}

// ============================================================================
// Sync and prune
// ============================================================================

#[test]
fn test_sync_dry_run_keeps_files() {
    let ws = Workspace::new();
    ws.write_config(&one_pack_config(&["sodium"]));
    ws.write_state(r#"{"P": {"sodium": {"version_id": "abc", "filename": "sodium-1.jar"}}}"#);
    let kept = ws.touch("P", "sodium-1.jar");
    let stray = ws.touch("P", "stray.jar");

    ws.cmd()
        .args(["sync", "P", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[DRY RUN] Would remove"))
        .stdout(predicate::str::contains("stray.jar"));

    assert!(kept.exists());
    assert!(stray.exists());
}

#[test]
fn test_sync_removes_only_unrecorded_jars() {
    let ws = Workspace::new();
    ws.write_config(&one_pack_config(&["sodium"]));
    ws.write_state(r#"{"P": {"sodium": {"version_id": "abc", "filename": "sodium-1.jar"}}}"#);
    let kept = ws.touch("P", "sodium-1.jar");
    let stray = ws.touch("P", "stray.jar");
    let notes = ws.touch("P", "notes.txt");

    ws.cmd()
        .args(["clean", "P"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 file(s)"));

    assert!(kept.exists());
    assert!(!stray.exists());
    assert!(notes.exists());
}

#[test]
fn test_sync_missing_directory_is_not_an_error() {
    let ws = Workspace::new();
    ws.write_config(&one_pack_config(&["sodium"]));

    ws.cmd()
        .args(["sync", "P"])
        .assert()
        .success()
        .stdout(predicate::str::contains("does not exist"));
}

#[test]
fn test_prune_then_sync_removes_dropped_mod() {
    let ws = Workspace::new();
    ws.write_config(&one_pack_config(&["sodium"]));
    ws.write_state(
        r#"{"P": {
            "sodium": {"version_id": "abc", "filename": "sodium-1.jar"},
            "iris": {"version_id": "def", "filename": "iris-1.jar"}
        }}"#,
    );
    ws.touch("P", "sodium-1.jar");
    let iris = ws.touch("P", "iris-1.jar");

    // Still recorded, so sync keeps it
    ws.cmd().args(["sync", "P"]).assert().success();
    assert!(iris.exists());

    ws.cmd()
        .args(["prune", "P"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Forgot iris"));

    ws.cmd().args(["sync", "P"]).assert().success();
    assert!(!iris.exists());
}

// ============================================================================
// Update against a mock API
// ============================================================================

#[test]
fn test_update_with_yes_downloads_and_records() {
    let mut server = Server::new();
    let url = server.url();
    let body = serde_json::json!([{
        "id": "abc",
        "version_number": "0.5.0",
        "game_versions": ["1.20.1"],
        "loaders": ["fabric"],
        "files": [{"url": format!("{}/files/sodium-0.5.0.jar", url), "filename": "sodium-0.5.0.jar", "primary": true}]
    }])
    .to_string();
    server
        .mock("GET", "/v2/project/sodium/version")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(body)
        .create();
    server
        .mock("GET", "/files/sodium-0.5.0.jar")
        .with_status(200)
        .with_body("jar bytes")
        .create();

    let ws = Workspace::new();
    ws.write_config(&one_pack_config(&["sodium"]));

    ws.cmd()
        .env("MODPILOT_API_URL", &url)
        .args(["update", "P", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 downloaded"));

    assert!(ws.mods().join("P").join("sodium-0.5.0.jar").exists());
    let state = fs::read_to_string(ws.state()).unwrap();
    assert!(state.contains("\"version_id\": \"abc\""));

    ws.cmd()
        .env("MODPILOT_API_URL", &url)
        .args(["status", "P"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All mods are up to date"));
}

#[test]
fn test_status_reports_pending_without_downloading() {
    let mut server = Server::new();
    let url = server.url();
    server
        .mock("GET", "/v2/project/sodium/version")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            serde_json::json!([{
                "id": "abc",
                "game_versions": ["1.20.1"],
                "loaders": ["fabric"],
                "files": [{"url": format!("{}/files/sodium.jar", url), "filename": "sodium.jar"}]
            }])
            .to_string(),
        )
        .create();
    let jar = server.mock("GET", "/files/sodium.jar").expect(0).create();

    let ws = Workspace::new();
    ws.write_config(&one_pack_config(&["sodium"]));

    ws.cmd()
        .env("MODPILOT_API_URL", &url)
        .args(["status", "P"])
        .assert()
        .success()
        .stdout(predicate::str::contains("need a download"));

    jar.assert();
    assert!(!ws.state().exists());
}
