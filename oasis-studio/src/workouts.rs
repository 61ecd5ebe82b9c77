use log::info;
use oasis_core::{SavedWorkout, WorkoutPlan};

use crate::{auth::Users, StoreError, UserData};

/// Workouts users keep on their profile, most recent first
pub struct WorkoutLibrary {
    users: Users,
}

impl WorkoutLibrary {
    pub fn new(users: &Users) -> Self {
        Self {
            users: users.clone(),
        }
    }

    pub fn list(&self, user: &UserData) -> Vec<SavedWorkout> {
        self.users
            .read(|users| {
                users
                    .iter()
                    .find(|u| u.id == user.id)
                    .map(|u| u.saved_workouts.clone())
            })
            .unwrap_or_default()
    }

    /// Saves a plan at the top of the user's list
    pub fn save(&self, user: &UserData, plan: WorkoutPlan) -> Result<SavedWorkout, StoreError> {
        let saved = SavedWorkout::new(plan);

        self.users
            .update_if(|users| {
                let target = users.iter_mut().find(|u| u.id == user.id)?;
                target.saved_workouts.insert(0, saved.clone());

                Some(())
            })?
            .ok_or(StoreError::NotFound { resource: "user" })?;

        info!("{} saved workout {}", user.username, saved.plan.plan_name);
        Ok(saved)
    }

    /// Removes the workout at `index`. An index out of range changes nothing.
    pub fn delete(&self, user: &UserData, index: usize) -> Result<bool, StoreError> {
        let removed = self.users.update_if(|users| {
            let target = users.iter_mut().find(|u| u.id == user.id)?;

            (index < target.saved_workouts.len()).then(|| target.saved_workouts.remove(index))
        })?;

        Ok(removed.is_some())
    }
}
