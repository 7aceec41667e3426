use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::validate_name;
use super::{overlay, overlay_opt, Entity, MemberInfo};
use crate::error::StoreError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Strength,
    Cardio,
    Flexibility,
    Hiit,
    CrossFit,
    #[default]
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    /// kg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// km
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Exercise {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sets: None,
            reps: None,
            weight: None,
            duration: None,
            distance: None,
            rest_time: None,
            notes: None,
        }
    }

    pub fn sets_reps(name: impl Into<String>, sets: u32, reps: u32) -> Self {
        Self {
            sets: Some(sets),
            reps: Some(reps),
            ..Self::new(name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(rename = "type", default)]
    pub workout_type: WorkoutType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscle_groups: Option<Vec<String>>,
    /// Id of the user who created the workout
    #[serde(default)]
    pub creator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Workout {
    /// Sum of sets across exercises that declare them
    pub fn total_sets(&self) -> u32 {
        self.exercises.iter().filter_map(|e| e.sets).sum()
    }
}

/// Create payload for `POST /workouts`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscle_groups: Option<Vec<String>>,
}

impl WorkoutDraft {
    pub fn new(title: impl Into<String>, workout_type: WorkoutType) -> Self {
        Self {
            title: title.into(),
            description: None,
            exercises: Vec::new(),
            workout_type,
            difficulty: None,
            duration: None,
            tags: None,
            muscle_groups: None,
        }
    }
}

/// Partial update for `PATCH /workouts/:id`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<Exercise>>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub workout_type: Option<WorkoutType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscle_groups: Option<Vec<String>>,
}

/// Query string for `GET /workouts`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscle_group: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub workout_type: Option<WorkoutType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

impl Entity for Workout {
    type Draft = WorkoutDraft;
    type Patch = WorkoutPatch;
    type Query = WorkoutQuery;

    const SINGULAR: &'static str = "workout";
    const PLURAL: &'static str = "workouts";
    const PATH: &'static str = "workouts";

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_patch(&mut self, patch: &WorkoutPatch) {
        overlay(&mut self.title, &patch.title);
        overlay_opt(&mut self.description, &patch.description);
        overlay(&mut self.exercises, &patch.exercises);
        overlay(&mut self.workout_type, &patch.workout_type);
        overlay_opt(&mut self.difficulty, &patch.difficulty);
        overlay_opt(&mut self.duration, &patch.duration);
        overlay_opt(&mut self.tags, &patch.tags);
        overlay_opt(&mut self.muscle_groups, &patch.muscle_groups);
    }

    fn validate_draft(draft: &WorkoutDraft) -> Result<(), StoreError> {
        validate_name(&draft.title, 1, "Title")?;
        if draft.exercises.iter().any(|e| e.name.trim().is_empty()) {
            return Err(StoreError::validation("Every exercise needs a name"));
        }
        Ok(())
    }

    fn synthesize(draft: WorkoutDraft, id: String, now: DateTime<Utc>, owner: &MemberInfo) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            exercises: draft.exercises,
            workout_type: draft.workout_type,
            difficulty: draft.difficulty,
            duration: draft.duration,
            tags: draft.tags,
            muscle_groups: draft.muscle_groups,
            creator: owner.user_id.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

impl std::fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkoutType::Strength => write!(f, "Strength"),
            WorkoutType::Cardio => write!(f, "Cardio"),
            WorkoutType::Flexibility => write!(f, "Flexibility"),
            WorkoutType::Hiit => write!(f, "HIIT"),
            WorkoutType::CrossFit => write!(f, "CrossFit"),
            WorkoutType::Custom => write!(f, "Custom"),
        }
    }
}

impl std::str::FromStr for WorkoutType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strength" => Ok(WorkoutType::Strength),
            "cardio" => Ok(WorkoutType::Cardio),
            "flexibility" => Ok(WorkoutType::Flexibility),
            "hiit" => Ok(WorkoutType::Hiit),
            "crossfit" => Ok(WorkoutType::CrossFit),
            "custom" => Ok(WorkoutType::Custom),
            _ => Err(anyhow::anyhow!("Invalid workout type: {}", s)),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "Beginner"),
            Difficulty::Intermediate => write!(f, "Intermediate"),
            Difficulty::Advanced => write!(f, "Advanced"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(anyhow::anyhow!("Invalid difficulty: {}", s)),
        }
    }
}
