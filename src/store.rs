//! In-memory plan store: an append-only forest of plans, weeks, workouts
//! and exercises, with JSON and source-literal snapshot projections.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::models::{Exercise, Plan, Week, Workout};

/// Filename used for the exported snapshot. Preload looks for the same file.
pub const EXPORT_FILE_NAME: &str = "workout_plans.json";

// Matches a quoted object key up to and including the colon.
static KEY_QUOTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]+)":"#).expect("key pattern is valid"));

/// Raw field values for [`PlanStore::add_exercise`], as read from the input
/// controls. Fields left empty fall back to the display defaults.
#[derive(Clone, Debug, Default)]
pub struct ExerciseFields {
    pub name: String,
    pub sets: String,
    pub reps: String,
    pub distance: String,
    pub time: String,
    pub rest_time: String,
    pub youtube_link: String,
}

/// Root of the hierarchy. Entities are only ever appended: there is no
/// delete, reorder or in-place edit, so positions stay stable for as long
/// as the store lives.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanStore {
    plans: Vec<Plan>,
}

impl PlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store directly from a full snapshot, replacing nothing
    /// incrementally. This is the wholesale form the preload step uses.
    pub fn from_plans(plans: Vec<Plan>) -> Self {
        PlanStore { plans }
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    /// Appends a plan with no weeks. Names that are empty after trimming
    /// are silently ignored. Returns whether the store changed.
    pub fn add_plan(&mut self, name: &str) -> bool {
        if name.trim().is_empty() {
            return false;
        }
        self.plans.push(Plan {
            name: name.to_string(),
            weeks: Vec::new(),
        });
        true
    }

    /// Appends a week with no workouts to the plan at `plan_index`.
    pub fn add_week(&mut self, plan_index: usize, name: &str) -> Result<bool> {
        if name.trim().is_empty() {
            return Ok(false);
        }
        let plan = self
            .plans
            .get_mut(plan_index)
            .ok_or(StoreError::PlanIndex(plan_index))?;
        plan.weeks.push(Week {
            name: name.to_string(),
            workouts: Vec::new(),
        });
        Ok(true)
    }

    /// Appends a workout with no exercises, one level deeper.
    pub fn add_workout(&mut self, plan_index: usize, week_index: usize, name: &str) -> Result<bool> {
        if name.trim().is_empty() {
            return Ok(false);
        }
        let week = self.week_mut(plan_index, week_index)?;
        week.workouts.push(Workout {
            name: name.to_string(),
            exercises: Vec::new(),
        });
        Ok(true)
    }

    /// Appends an exercise built from `fields`. Every field except the name
    /// defaults to `"-"` when empty; the video link defaults to `"#"`.
    pub fn add_exercise(
        &mut self,
        plan_index: usize,
        week_index: usize,
        workout_index: usize,
        fields: ExerciseFields,
    ) -> Result<bool> {
        if fields.name.trim().is_empty() {
            return Ok(false);
        }
        let workout = self.workout_mut(plan_index, week_index, workout_index)?;
        workout.exercises.push(Exercise {
            name: fields.name,
            sets: or_dash(fields.sets),
            reps: or_dash(fields.reps),
            distance: or_dash(fields.distance),
            time: or_dash(fields.time),
            rest_time: or_dash(fields.rest_time),
            youtube_link: if fields.youtube_link.is_empty() {
                "#".to_string()
            } else {
                fields.youtube_link
            },
        });
        Ok(true)
    }

    /// Pretty-printed JSON snapshot of the whole store. Pure projection.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.plans)?)
    }

    /// The same snapshot as a source literal: object keys unquoted and
    /// string delimiters normalized to single quotes, wrapped in a `let`
    /// statement for pasting into a preload step. Pure projection.
    pub fn to_source_literal(&self) -> Result<String> {
        let json = self.to_json()?;
        let unquoted = KEY_QUOTES.replace_all(&json, "${1}:");
        Ok(format!("let plans = {};", unquoted.replace('"', "'")))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(PlanStore {
            plans: serde_json::from_str(json)?,
        })
    }

    /// Reads a snapshot previously written by [`PlanStore::export_to_file`].
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Writes the JSON snapshot into `dir` under [`EXPORT_FILE_NAME`] and
    /// returns the full path.
    pub fn export_to_file(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(EXPORT_FILE_NAME);
        fs::write(&path, self.to_json()?)?;
        Ok(path)
    }

    fn week_mut(&mut self, plan_index: usize, week_index: usize) -> Result<&mut Week> {
        let plan = self
            .plans
            .get_mut(plan_index)
            .ok_or(StoreError::PlanIndex(plan_index))?;
        plan.weeks.get_mut(week_index).ok_or(StoreError::WeekIndex {
            plan: plan_index,
            week: week_index,
        })
    }

    fn workout_mut(
        &mut self,
        plan_index: usize,
        week_index: usize,
        workout_index: usize,
    ) -> Result<&mut Workout> {
        let week = self.week_mut(plan_index, week_index)?;
        week.workouts
            .get_mut(workout_index)
            .ok_or(StoreError::WorkoutIndex {
                plan: plan_index,
                week: week_index,
                workout: workout_index,
            })
    }
}

fn or_dash(value: String) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise_fields(name: &str) -> ExerciseFields {
        ExerciseFields {
            name: name.to_string(),
            ..ExerciseFields::default()
        }
    }

    fn seeded_store() -> PlanStore {
        let mut store = PlanStore::new();
        assert!(store.add_plan("Preseason"));
        assert!(store.add_week(0, "Week 1").unwrap());
        assert!(store.add_workout(0, 0, "Day 1").unwrap());
        let fields = ExerciseFields {
            name: "Squat".to_string(),
            sets: "3".to_string(),
            reps: "5".to_string(),
            ..ExerciseFields::default()
        };
        assert!(store.add_exercise(0, 0, 0, fields).unwrap());
        store
    }

    #[test]
    fn test_add_plan_appends_in_order() {
        let mut store = PlanStore::new();
        assert!(store.add_plan("A"));
        assert!(store.add_plan("B"));
        assert!(store.add_plan("C"));

        let names: Vec<&str> = store.plans().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert!(store.plans().iter().all(|p| p.weeks.is_empty()));
    }

    #[test]
    fn test_add_plan_blank_name_is_ignored() {
        let mut store = PlanStore::new();
        assert!(!store.add_plan(""));
        assert!(!store.add_plan("   "));
        assert!(store.plans().is_empty());
    }

    #[test]
    fn test_blank_names_are_ignored_at_every_level() {
        let mut store = seeded_store();
        assert!(!store.add_week(0, " ").unwrap());
        assert!(!store.add_workout(0, 0, "").unwrap());
        assert!(!store.add_exercise(0, 0, 0, exercise_fields("  ")).unwrap());

        let plan = &store.plans()[0];
        assert_eq!(plan.weeks.len(), 1);
        assert_eq!(plan.weeks[0].workouts.len(), 1);
        assert_eq!(plan.weeks[0].workouts[0].exercises.len(), 1);
    }

    #[test]
    fn test_add_week_rejects_bad_plan_index() {
        let mut store = PlanStore::new();
        assert!(store.add_plan("A"));

        let err = store.add_week(1, "Week 1").unwrap_err();
        assert!(matches!(err, StoreError::PlanIndex(1)));
        assert!(store.plans()[0].weeks.is_empty());
    }

    #[test]
    fn test_add_workout_rejects_bad_week_index() {
        let mut store = PlanStore::new();
        assert!(store.add_plan("A"));

        let err = store.add_workout(0, 0, "Day 1").unwrap_err();
        assert!(matches!(err, StoreError::WeekIndex { plan: 0, week: 0 }));
    }

    #[test]
    fn test_add_exercise_rejects_bad_workout_index() {
        let mut store = PlanStore::new();
        assert!(store.add_plan("A"));
        assert!(store.add_week(0, "Week 1").unwrap());

        let err = store
            .add_exercise(0, 0, 3, exercise_fields("Squat"))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::WorkoutIndex {
                plan: 0,
                week: 0,
                workout: 3
            }
        ));
    }

    #[test]
    fn test_add_exercise_applies_display_defaults() {
        let mut store = PlanStore::new();
        assert!(store.add_plan("A"));
        assert!(store.add_week(0, "Week 1").unwrap());
        assert!(store.add_workout(0, 0, "Day 1").unwrap());
        assert!(store
            .add_exercise(0, 0, 0, exercise_fields("Bike sprint"))
            .unwrap());

        let exercise = &store.plans()[0].weeks[0].workouts[0].exercises[0];
        assert_eq!(exercise.name, "Bike sprint");
        assert_eq!(exercise.sets, "-");
        assert_eq!(exercise.reps, "-");
        assert_eq!(exercise.distance, "-");
        assert_eq!(exercise.time, "-");
        assert_eq!(exercise.rest_time, "-");
        assert_eq!(exercise.youtube_link, "#");
    }

    #[test]
    fn test_plan_order_survives_nested_additions() {
        let mut store = PlanStore::new();
        assert!(store.add_plan("A"));
        assert!(store.add_plan("B"));
        assert!(store.add_plan("C"));

        assert!(store.add_week(1, "Week 1").unwrap());
        assert!(store.add_workout(1, 0, "Day 1").unwrap());
        assert!(store
            .add_exercise(1, 0, 0, exercise_fields("Deadlift"))
            .unwrap());
        assert!(store.add_week(2, "Week 1").unwrap());

        let names: Vec<&str> = store.plans().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert!(store.plans()[0].weeks.is_empty());
        assert_eq!(store.plans()[1].weeks.len(), 1);
        assert_eq!(store.plans()[2].weeks.len(), 1);
    }

    #[test]
    fn test_build_single_plan_end_to_end() {
        let store = seeded_store();

        let expected = PlanStore::from_plans(vec![Plan {
            name: "Preseason".to_string(),
            weeks: vec![Week {
                name: "Week 1".to_string(),
                workouts: vec![Workout {
                    name: "Day 1".to_string(),
                    exercises: vec![Exercise {
                        name: "Squat".to_string(),
                        sets: "3".to_string(),
                        reps: "5".to_string(),
                        distance: "-".to_string(),
                        time: "-".to_string(),
                        rest_time: "-".to_string(),
                        youtube_link: "#".to_string(),
                    }],
                }],
            }],
        }]);
        assert_eq!(store, expected);
    }

    #[test]
    fn test_json_round_trip() {
        let store = seeded_store();
        let json = store.to_json().unwrap();
        let restored = PlanStore::from_json(&json).unwrap();
        assert_eq!(restored, store);
    }

    #[test]
    fn test_empty_store_serializes_to_empty_array() {
        let store = PlanStore::new();
        assert_eq!(store.to_json().unwrap(), "[]");
        assert_eq!(store.to_source_literal().unwrap(), "let plans = [];");
    }

    #[test]
    fn test_source_literal_unquotes_keys_and_strings() {
        let store = seeded_store();
        let source = store.to_source_literal().unwrap();

        assert!(source.starts_with("let plans = ["));
        assert!(source.ends_with("];"));
        assert!(source.contains("name: 'Preseason'"));
        assert!(source.contains("restTime: '-'"));
        assert!(source.contains("youtubeLink: '#'"));
        assert!(!source.contains('"'));
    }

    #[test]
    fn test_export_then_preload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store();

        let path = store.export_to_file(dir.path()).unwrap();
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some(EXPORT_FILE_NAME)
        );

        let restored = PlanStore::load_from_file(&path).unwrap();
        assert_eq!(restored, store);
    }
}
