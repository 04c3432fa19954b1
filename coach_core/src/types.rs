//! Core domain types for the AI Coach pipeline.
//!
//! These mirror the records the app keeps for a finished workout:
//! - The session itself, with its optional schedule and plan
//! - Performed exercises in the order they were done
//! - Performed sets, with weight stored in grams
//!
//! Field aliases accept the upstream database JSON shape
//! (`session_schedule`, `performed_exercise`, `performed_exercise_set`,
//! `exercise_set_type`) as well as the shorter Rust-side names.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Exported rows use `null` for empty relations and missing names.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// RFC 3339 timestamps, or local-style ones without an offset read as UTC.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&raw, fmt).ok())
        .map(|naive| Some(naive.and_utc()))
        .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {:?}", raw)))
}

// ============================================================================
// Schedule Types
// ============================================================================

/// Training plan a schedule belongs to
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PlanRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Schedule entry the session was started from
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ScheduleRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub plan: Option<PlanRef>,
}

// ============================================================================
// Session Types
// ============================================================================

/// A single performed set
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PerformedSet {
    /// Weight in grams. Absent is displayed as zero.
    #[serde(default)]
    pub weight: Option<i64>,
    #[serde(default)]
    pub reps: Option<i64>,
    /// Absent is displayed as "Normal".
    #[serde(default, alias = "exercise_set_type")]
    pub set_type: Option<String>,
    /// Only presence matters: a timestamp means the set was finished.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl PerformedSet {
    /// Whether the set carries a completion timestamp
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// An exercise performed during a session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PerformedExercise {
    pub name: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default, alias = "performed_exercise_set", deserialize_with = "null_as_default")]
    pub sets: Vec<PerformedSet>,
}

/// A completed workout session as supplied by the caller
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct WorkoutSession {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default, alias = "session_schedule")]
    pub schedule: Option<ScheduleRef>,
    #[serde(default, alias = "performed_exercise", deserialize_with = "null_as_default")]
    pub exercises: Vec<PerformedExercise>,
}

impl WorkoutSession {
    /// Whole minutes between start and completion, rounded half up.
    ///
    /// Returns None unless both timestamps are present.
    pub fn duration_minutes(&self) -> Option<i64> {
        let (started, completed) = (self.started_at?, self.completed_at?);
        let millis = (completed - started).num_milliseconds();
        Some((millis as f64 / 60_000.0 + 0.5).floor() as i64)
    }
}
