//! Error types for the plan store

use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Error type for store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// No plan exists at the given index
    #[error("no plan at index {0}")]
    PlanIndex(usize),

    /// No week exists at the given index within the plan
    #[error("no week at index {week} in plan {plan}")]
    WeekIndex { plan: usize, week: usize },

    /// No workout exists at the given index within the week
    #[error("no workout at index {workout} in plan {plan}, week {week}")]
    WorkoutIndex {
        plan: usize,
        week: usize,
        workout: usize,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
