//! Workout session loader.
//!
//! Sessions arrive as JSON exported from the workout app, one session per
//! file. Both the app's database field names and the shorter Rust-side names
//! are accepted.

use crate::{Error, Result, WorkoutSession};
use std::path::Path;

/// Load a workout session from a JSON file
pub fn load_session(path: &Path) -> Result<WorkoutSession> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        Error::Session(format!("Failed to read session file {:?}: {}", path, e))
    })?;

    let session = parse_session(&contents)?;
    tracing::debug!(
        "Loaded session {:?} from {:?} with {} exercises",
        session.id,
        path,
        session.exercises.len()
    );
    Ok(session)
}

/// Parse a workout session from a JSON string
pub fn parse_session(json: &str) -> Result<WorkoutSession> {
    serde_json::from_str(json).map_err(|e| Error::Session(format!("Invalid session JSON: {}", e)))
}
