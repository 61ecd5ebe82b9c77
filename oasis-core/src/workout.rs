use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single movement within a workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: String,
    pub reps: String,
    pub notes: String,
}

/// A named exercise session, either authored for the template bank or generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub plan_name: String,
    pub difficulty: String,
    /// Duration in minutes, as displayed
    pub duration: String,
    pub warmup: String,
    pub exercises: Vec<Exercise>,
    pub cooldown: String,

    // Only used when matching against the template bank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_goal: Option<Goal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_level: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_equipment: Option<Equipment>,
}

/// A workout plan a user kept in their profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedWorkout {
    #[serde(flatten)]
    pub plan: WorkoutPlan,
    /// Older saves have no date, they are treated as saved now
    #[serde(default = "Utc::now")]
    pub date_created: DateTime<Utc>,
}

impl SavedWorkout {
    pub fn new(plan: WorkoutPlan) -> Self {
        Self {
            plan,
            date_created: Utc::now(),
        }
    }
}

/// What the user asked the trainer for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub goal: Goal,
    pub level: Level,
    pub equipment: Equipment,
    /// Requested duration in minutes
    pub duration: String,
}

impl WorkoutPlan {
    /// Tags the plan with the preferences it was produced for, so it can be matched later.
    pub fn tagged_with(mut self, preferences: &UserPreferences) -> Self {
        self.target_goal = Some(preferences.goal);
        self.target_level = Some(preferences.level);
        self.target_equipment = Some(preferences.equipment);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Goal {
    #[serde(rename = "Ganhar Músculo")]
    BuildMuscle,
    #[serde(rename = "Perder Peso")]
    LoseWeight,
    #[serde(rename = "Melhorar Resistência")]
    Endurance,
    #[serde(rename = "Treino de Força")]
    Strength,
    #[serde(rename = "Mobilidade e Flexibilidade")]
    Mobility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "Iniciante")]
    Beginner,
    #[serde(rename = "Intermediário")]
    Intermediate,
    #[serde(rename = "Avançado")]
    Advanced,
}

/// The equipment class a workout is designed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Equipment {
    #[serde(rename = "Academia Completa")]
    FullGym,
    #[serde(rename = "Apenas Halteres")]
    DumbbellsOnly,
    #[serde(rename = "Apenas Peso do Corpo")]
    BodyweightOnly,
    #[serde(rename = "Academia em Casa (Básica)")]
    HomeGymBasic,
}

impl Goal {
    pub const ALL: [Goal; 5] = [
        Goal::BuildMuscle,
        Goal::LoseWeight,
        Goal::Endurance,
        Goal::Strength,
        Goal::Mobility,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Goal::BuildMuscle => "Ganhar Músculo",
            Goal::LoseWeight => "Perder Peso",
            Goal::Endurance => "Melhorar Resistência",
            Goal::Strength => "Treino de Força",
            Goal::Mobility => "Mobilidade e Flexibilidade",
        }
    }
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    pub fn label(&self) -> &'static str {
        match self {
            Level::Beginner => "Iniciante",
            Level::Intermediate => "Intermediário",
            Level::Advanced => "Avançado",
        }
    }
}

impl Equipment {
    pub const ALL: [Equipment; 4] = [
        Equipment::FullGym,
        Equipment::DumbbellsOnly,
        Equipment::BodyweightOnly,
        Equipment::HomeGymBasic,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Equipment::FullGym => "Academia Completa",
            Equipment::DumbbellsOnly => "Apenas Halteres",
            Equipment::BodyweightOnly => "Apenas Peso do Corpo",
            Equipment::HomeGymBasic => "Academia em Casa (Básica)",
        }
    }
}

impl Display for Goal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Display for Equipment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
