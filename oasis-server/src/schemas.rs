use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use oasis_core::{Equipment, Exercise, Goal, Level, UserPreferences, WorkoutPlan};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::errors::ServerError;

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginSchema {
    #[validate(length(max = 128))]
    pub username: String,
    #[validate(length(max = 128))]
    pub password: String,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterSchema {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(min = 1, max = 128))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateProfileSchema {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    /// Image URL, or an empty string to remove the avatar
    #[validate(length(max = 2000000))]
    pub avatar: Option<String>,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContentSchema {
    #[validate(length(max = 2000000))]
    pub value: String,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewPostSchema {
    #[validate(length(max = 200))]
    #[serde(default)]
    pub title: String,
    #[validate(length(max = 64))]
    #[serde(default)]
    pub category: String,
    #[validate(length(min = 1, max = 10000))]
    pub content: String,
    /// Image URL, data URLs included
    #[validate(length(max = 2000000))]
    pub image: Option<String>,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CommentSchema {
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PreferencesSchema {
    #[schema(value_type = String, example = "Ganhar Músculo")]
    pub goal: Goal,
    #[schema(value_type = String, example = "Iniciante")]
    pub level: Level,
    #[schema(value_type = String, example = "Academia Completa")]
    pub equipment: Equipment,
    /// Minutes
    #[validate(length(min = 1, max = 3))]
    pub duration: String,
}

#[derive(Debug, ToSchema, Validate, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExerciseSchema {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 64))]
    pub sets: String,
    #[validate(length(max = 64))]
    pub reps: String,
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlanSchema {
    #[validate(length(min = 1, max = 200))]
    pub plan_name: String,
    #[validate(length(max = 64))]
    pub difficulty: String,
    #[validate(length(max = 16))]
    pub duration: String,
    #[validate(length(max = 2000))]
    pub warmup: String,
    #[validate(length(min = 1, max = 50), nested)]
    pub exercises: Vec<ExerciseSchema>,
    #[validate(length(max = 2000))]
    pub cooldown: String,
    #[schema(value_type = Option<String>)]
    pub target_goal: Option<Goal>,
    #[schema(value_type = Option<String>)]
    pub target_level: Option<Level>,
    #[schema(value_type = Option<String>)]
    pub target_equipment: Option<Equipment>,
}

impl From<PreferencesSchema> for UserPreferences {
    fn from(value: PreferencesSchema) -> Self {
        Self {
            goal: value.goal,
            level: value.level,
            equipment: value.equipment,
            duration: value.duration,
        }
    }
}

impl From<PlanSchema> for WorkoutPlan {
    fn from(value: PlanSchema) -> Self {
        Self {
            plan_name: value.plan_name,
            difficulty: value.difficulty,
            duration: value.duration,
            warmup: value.warmup,
            exercises: value
                .exercises
                .into_iter()
                .map(|e| Exercise {
                    name: e.name,
                    sets: e.sets,
                    reps: e.reps,
                    notes: e.notes,
                })
                .collect(),
            cooldown: value.cooldown,
            target_goal: value.target_goal,
            target_level: value.target_level,
            target_equipment: value.target_equipment,
        }
    }
}

/// JSON body that is validated before it reaches a handler.
/// Invalid bodies are answered with 400 and the names of the offending fields.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ServerError::Invalid(rejection.body_text()))?;

        body.validate().map_err(invalid_fields)?;

        Ok(Self(body))
    }
}

fn invalid_fields(errors: ValidationErrors) -> ServerError {
    let mut fields: Vec<_> = errors.errors().keys().map(|f| f.to_string()).collect();
    fields.sort();

    ServerError::Invalid(format!("Invalid fields: {}", fields.join(", ")))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn preferences_use_the_labels() {
        let schema: PreferencesSchema = serde_json::from_str(
            r#"{
                "goal": "Perder Peso",
                "level": "Intermediário",
                "equipment": "Apenas Peso do Corpo",
                "duration": "30"
            }"#,
        )
        .unwrap();

        assert!(schema.validate().is_ok());

        let preferences: UserPreferences = schema.into();
        assert_eq!(preferences.goal, Goal::LoseWeight);
        assert_eq!(preferences.equipment, Equipment::BodyweightOnly);
    }

    #[test]
    fn plans_need_exercises() {
        let schema: PlanSchema = serde_json::from_str(
            r#"{
                "planName": "Vazio",
                "difficulty": "Iniciante",
                "duration": "30",
                "warmup": "",
                "exercises": [],
                "cooldown": ""
            }"#,
        )
        .unwrap();

        assert!(schema.validate().is_err());
    }

    #[test]
    fn blank_registrations_are_invalid() {
        let schema: RegisterSchema =
            serde_json::from_str(r#"{ "name": "", "username": "ana", "password": "secret" }"#)
                .unwrap();

        assert!(schema.validate().is_err());
    }

    #[test]
    fn invalid_fields_are_named() {
        let schema: PlanSchema = serde_json::from_str(
            r#"{
                "planName": "",
                "difficulty": "Iniciante",
                "duration": "30",
                "warmup": "",
                "exercises": [],
                "cooldown": ""
            }"#,
        )
        .unwrap();

        let error = invalid_fields(schema.validate().unwrap_err());

        assert_eq!(error.to_string(), "Invalid fields: exercises, plan_name");
    }
}
