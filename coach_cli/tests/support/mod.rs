//! Shared helpers for the coach CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// Same stub service the core client tests run against
#[path = "../../../coach_core/src/test_support.rs"]
mod stub;

pub use stub::{closed_port_url, Reply, StubServer};

/// Helper to create an isolated test directory
pub fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// CLI command with config lookups pointed at `home`
pub fn cli(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("coach"));
    cmd.env("XDG_CONFIG_HOME", home.join("config"))
        .env("HOME", home)
        .env_remove("RUST_LOG");
    cmd
}

pub const PUSH_DAY_JSON: &str = r#"{
    "id": "5f0c6a52-6a43-4c5e-9a55-1b1f5e8b2f10",
    "started_at": "2024-01-15T10:00:00Z",
    "completed_at": "2024-01-15T10:45:00Z",
    "note": null,
    "session_schedule": { "name": "Push Day", "plan": { "name": "Strength Block" } },
    "performed_exercise": [
        {
            "name": "Bench Press",
            "note": "Paused first rep",
            "performed_exercise_set": [
                { "weight": 10000, "reps": 5, "exercise_set_type": null, "completed_at": "2024-01-15T10:05:00Z" },
                { "weight": 10000, "reps": 3, "exercise_set_type": null, "completed_at": null }
            ]
        }
    ]
}"#;

pub const PUSH_DAY_PROMPT: &str = "Workout: Push Day
Plan: Strength Block
Duration: 45 minutes

Exercises:

Bench Press:
  Set 1: 10kg × 5 reps (Normal) ✓
  Set 2: 10kg × 3 reps (Normal) ○
  Notes: Paused first rep";

/// Write the standard session fixture into `dir`
pub fn write_session(dir: &Path) -> PathBuf {
    let path = dir.join("session.json");
    std::fs::write(&path, PUSH_DAY_JSON).expect("Failed to write session fixture");
    path
}
