use async_trait::async_trait;
use oasis_core::{UserPreferences, WorkoutPlan};
use thiserror::Error;

mod gemini;
pub use gemini::*;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("No API key is configured for the workout generator")]
    MissingApiKey,

    #[error("Failed to reach the generator: {0}")]
    Request(String),

    #[error("Generator responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Generator returned no content")]
    EmptyResponse,

    #[error("Failed to parse generated plan: {0}")]
    Parse(String),
}

/// Represents an external service that can write a workout plan from scratch
#[async_trait]
pub trait WorkoutGenerator: Send + Sync + 'static {
    /// Generates a plan for the preferences. A single attempt is made.
    async fn generate(&self, preferences: &UserPreferences) -> Result<WorkoutPlan, GeneratorError>;
}

/// Used when no generator is configured
pub struct DisabledGenerator;

#[async_trait]
impl WorkoutGenerator for DisabledGenerator {
    async fn generate(&self, _: &UserPreferences) -> Result<WorkoutPlan, GeneratorError> {
        Err(GeneratorError::MissingApiKey)
    }
}
