use std::sync::Arc;

use log::{info, warn};
use oasis_core::{UserPreferences, WorkoutPlan};
use serde::Serialize;
use thiserror::Error;

use crate::{GeneratorError, TemplateBank, WorkoutGenerator};

/// Recommends workouts, preferring the template bank over generation
pub struct Trainer {
    templates: Arc<TemplateBank>,
    generator: Arc<dyn WorkoutGenerator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlanSource {
    /// Picked from the template bank
    Bank,
    /// Written by the generator
    Generated,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub plan: WorkoutPlan,
    pub source: PlanSource,
}

#[derive(Debug, Error)]
pub enum TrainerError {
    #[error("Não foi possível gerar um plano específico neste momento. Tente mudar os parâmetros ou tente novamente mais tarde.")]
    Unavailable(#[source] GeneratorError),
}

impl Trainer {
    pub fn new(templates: Arc<TemplateBank>, generator: Arc<dyn WorkoutGenerator>) -> Self {
        Self {
            templates,
            generator,
        }
    }

    pub async fn recommend(
        &self,
        preferences: &UserPreferences,
    ) -> Result<Recommendation, TrainerError> {
        if let Some(plan) = self.templates.find(preferences) {
            info!("Recommending template {}", plan.plan_name);

            return Ok(Recommendation {
                plan,
                source: PlanSource::Bank,
            });
        }

        let plan = self.generator.generate(preferences).await.map_err(|e| {
            warn!("Could not generate a plan: {}", e);
            TrainerError::Unavailable(e)
        })?;

        info!("Recommending generated plan {}", plan.plan_name);

        // Tagged so an administrator can add it to the bank as is
        Ok(Recommendation {
            plan: plan.tagged_with(preferences),
            source: PlanSource::Generated,
        })
    }
}
