//! Prompt formatting for a completed workout session.
//!
//! The output is a stable, plain-text summary meant for the coaching model:
//!
//! ```text
//! Workout: Push Day
//! Plan: Strength Block
//! Duration: 45 minutes
//!
//! Exercises:
//!
//! Bench Press:
//!   Set 1: 10kg × 5 reps (Normal) ✓
//!   Set 2: 10kg × 3 reps (Normal) ○
//! ```
//!
//! Formatting never fails; every optional field has a substitution.
//! Exercises and sets keep their input order.

use crate::{PerformedExercise, PerformedSet, WorkoutSession};

pub const DEFAULT_WORKOUT_NAME: &str = "Custom Workout";
pub const DEFAULT_PLAN_NAME: &str = "No plan";
pub const DEFAULT_SET_TYPE: &str = "Normal";
pub const NO_SETS_PLACEHOLDER: &str = "  No sets recorded";
pub const NO_EXERCISES_PLACEHOLDER: &str = "No exercises recorded";

pub const COMPLETED_MARKER: char = '✓';
pub const PENDING_MARKER: char = '○';

/// Format a session into the prompt text sent to the coach
pub fn format_session(session: &WorkoutSession) -> String {
    let header = header_lines(session).join("\n");

    let exercises = if session.exercises.is_empty() {
        NO_EXERCISES_PLACEHOLDER.to_string()
    } else {
        session
            .exercises
            .iter()
            .map(format_exercise)
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    format!("{}\n\nExercises:\n\n{}", header, exercises)
}

fn header_lines(session: &WorkoutSession) -> Vec<String> {
    let schedule = session.schedule.as_ref();
    let workout = schedule
        .map(|s| s.name.as_str())
        .and_then(non_empty)
        .unwrap_or(DEFAULT_WORKOUT_NAME);
    let plan = schedule
        .and_then(|s| s.plan.as_ref())
        .map(|p| p.name.as_str())
        .and_then(non_empty)
        .unwrap_or(DEFAULT_PLAN_NAME);

    let mut lines = vec![format!("Workout: {}", workout), format!("Plan: {}", plan)];

    if let Some(minutes) = session.duration_minutes() {
        lines.push(format!("Duration: {} minutes", minutes));
    }
    if let Some(note) = session.note.as_deref().and_then(non_empty) {
        lines.push(format!("Session Notes: {}", note));
    }
    lines
}

fn format_exercise(exercise: &PerformedExercise) -> String {
    let sets = if exercise.sets.is_empty() {
        NO_SETS_PLACEHOLDER.to_string()
    } else {
        exercise
            .sets
            .iter()
            .enumerate()
            .map(|(index, set)| format_set(index + 1, set))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let mut block = format!("{}:\n{}", exercise.name, sets);
    if let Some(note) = exercise.note.as_deref().and_then(non_empty) {
        block.push_str("\n  Notes: ");
        block.push_str(note);
    }
    block
}

fn format_set(number: usize, set: &PerformedSet) -> String {
    let marker = if set.is_completed() {
        COMPLETED_MARKER
    } else {
        PENDING_MARKER
    };
    format!(
        "  Set {}: {} × {} reps ({}) {}",
        number,
        format_weight(set.weight.unwrap_or(0)),
        set.reps.unwrap_or(0),
        set.set_type.as_deref().and_then(non_empty).unwrap_or(DEFAULT_SET_TYPE),
        marker
    )
}

/// Grams to a kilogram label: 1000 -> "1kg", 1250 -> "1.25kg"
pub fn format_weight(grams: i64) -> String {
    format!("{}kg", grams as f64 / 1000.0)
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
