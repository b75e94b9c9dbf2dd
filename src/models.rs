//models.rs
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: String,
    pub reps: String,
    pub distance: String,
    pub time: String,
    #[serde(rename = "restTime")]
    pub rest_time: String,
    #[serde(rename = "youtubeLink")]
    pub youtube_link: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub name: String,
    pub exercises: Vec<Exercise>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Week {
    pub name: String,
    pub workouts: Vec<Workout>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    pub weeks: Vec<Week>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_keeps_original_key_casing() {
        let exercise = Exercise {
            name: "Squat".to_string(),
            sets: "3".to_string(),
            reps: "5".to_string(),
            distance: "-".to_string(),
            time: "-".to_string(),
            rest_time: "90s".to_string(),
            youtube_link: "#".to_string(),
        };

        let json = serde_json::to_string(&exercise).unwrap();
        assert!(json.contains("\"restTime\":\"90s\""));
        assert!(json.contains("\"youtubeLink\":\"#\""));
        assert!(!json.contains("rest_time"));

        let back: Exercise = serde_json::from_str(&json).unwrap();
        assert_eq!(back, exercise);
    }
}
