use std::sync::Arc;

use log::info;
use oasis_core::{find_template, UserPreferences, WorkoutPlan};
use parking_lot::Mutex;
use rand::RngCore;

use crate::{Persisted, Storage, StorageError, StorageKey, StoreError, UserData};

pub type BoxedRng = Box<dyn RngCore + Send>;

/// The curated workouts consulted before asking the generator
pub struct TemplateBank {
    templates: Persisted<Vec<WorkoutPlan>>,
    rng: Mutex<BoxedRng>,
}

impl TemplateBank {
    pub fn new(
        storage: &Arc<dyn Storage>,
        defaults: Vec<WorkoutPlan>,
        rng: BoxedRng,
    ) -> Result<Self, StorageError> {
        let templates =
            Persisted::load_merged(storage, StorageKey::Templates, defaults, merge_templates)?;

        Ok(Self {
            templates,
            rng: Mutex::new(rng),
        })
    }

    /// Finds the best template for the preferences, see [find_template]
    pub fn find(&self, preferences: &UserPreferences) -> Option<WorkoutPlan> {
        let mut rng = self.rng.lock();

        self.templates
            .read(|templates| find_template(templates, preferences, &mut **rng))
    }

    /// Adds a plan to the bank. Returns false without changing anything if the actor is not an administrator.
    pub fn save(&self, actor: &UserData, plan: WorkoutPlan) -> Result<bool, StoreError> {
        if !actor.is_admin {
            return Ok(false);
        }

        if plan.target_equipment.is_none() {
            return Err(StoreError::Validation(
                "Templates need a target equipment class".to_string(),
            ));
        }

        let name = plan.plan_name.clone();
        let count = self.templates.update(|templates| {
            templates.push(plan);
            templates.len()
        })?;

        info!("{} added template {} ({} in bank)", actor.username, name, count);
        Ok(true)
    }

    pub fn count(&self) -> usize {
        self.templates.read(|templates| templates.len())
    }

    pub fn list(&self) -> Vec<WorkoutPlan> {
        self.templates.get()
    }
}

/// Keeps every bundled template, then adds the stored ones the bundle doesn't already have.
/// Bundled templates win over stored copies with the same name and equipment.
fn merge_templates(defaults: Vec<WorkoutPlan>, stored: Vec<WorkoutPlan>) -> Vec<WorkoutPlan> {
    let is_default = |plan: &WorkoutPlan| {
        defaults.iter().any(|d| {
            d.plan_name == plan.plan_name && d.target_equipment == plan.target_equipment
        })
    };

    let added: Vec<_> = stored.into_iter().filter(|p| !is_default(p)).collect();

    let mut merged = defaults;
    merged.extend(added);
    merged
}
