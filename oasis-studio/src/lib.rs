mod auth;
mod content;
mod feed;
mod generator;
mod persisted;
mod storage;
mod templates;
mod trainer;
mod util;
mod workouts;

use std::sync::Arc;

use log::{info, warn};
use oasis_core::{default_templates, Config};
use rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;

pub use auth::*;
pub use content::*;
pub use feed::*;
pub use generator::*;
pub use persisted::*;
pub use storage::*;
pub use templates::*;
pub use trainer::*;
pub use workouts::*;

/// The oasis studio, holding all site state and the operations on it.
pub struct Studio {
    pub auth: Auth,
    pub content: ContentManager,
    pub feed: Feed,
    pub workouts: WorkoutLibrary,
    pub templates: Arc<TemplateBank>,
    pub trainer: Trainer,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Validation(String),

    #[error("The {resource} does not exist")]
    NotFound { resource: &'static str },
}

#[derive(Debug, Error)]
pub enum StudioError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Bundled templates are invalid: {0}")]
    Seed(#[from] serde_json::Error),

    #[error("Could not create the administrator: {0}")]
    Auth(#[from] AuthError),
}

impl Studio {
    /// Loads the studio from storage, seeding defaults where nothing is stored
    pub fn new(
        config: &Config,
        storage: Arc<dyn Storage>,
        generator: Arc<dyn WorkoutGenerator>,
    ) -> Result<Self, StudioError> {
        Self::with_rng(config, storage, generator, Box::new(StdRng::from_entropy()))
    }

    /// Same as [Studio::new], with the randomness used for picking templates
    pub fn with_rng(
        config: &Config,
        storage: Arc<dyn Storage>,
        generator: Arc<dyn WorkoutGenerator>,
        rng: BoxedRng,
    ) -> Result<Self, StudioError> {
        if storage.read(StorageKey::LegacyAdminSession)?.is_some() {
            warn!(
                "Removing legacy {} flag, log in again to administrate",
                StorageKey::LegacyAdminSession
            );
            storage.remove(StorageKey::LegacyAdminSession)?;
        }

        let users = Arc::new(Persisted::load(&storage, StorageKey::Users, vec![])?);

        let auth = Auth::new(&storage, &users, config.session_duration_in_days)?;
        let content = ContentManager::new(&storage)?;
        let feed = Feed::new(&storage)?;
        let workouts = WorkoutLibrary::new(&users);
        let templates = Arc::new(TemplateBank::new(&storage, default_templates()?, rng)?);
        let trainer = Trainer::new(templates.clone(), generator);

        if let Some(admin) = &config.admin {
            auth.ensure_admin(admin)?;
        } else if !users.read(|users| users.iter().any(|u| u.is_admin)) {
            warn!("No administrator is configured, site content cannot be edited");
        }

        info!(
            "Loaded {} users, {} posts and {} templates",
            users.read(|users| users.len()),
            feed.list().len(),
            templates.count()
        );

        Ok(Self {
            auth,
            content,
            feed,
            workouts,
            templates,
            trainer,
        })
    }
}

#[cfg(test)]
pub(crate) fn test_user(username: &str, is_admin: bool) -> UserData {
    UserData {
        id: format!("id-{}", username),
        name: format!("{} da Silva", username),
        username: username.to_string(),
        password: String::new(),
        is_admin,
        saved_workouts: vec![],
        avatar: None,
    }
}

#[cfg(test)]
pub(crate) fn test_plan(name: &str) -> oasis_core::WorkoutPlan {
    oasis_core::WorkoutPlan {
        plan_name: name.to_string(),
        difficulty: "Intermediário".to_string(),
        duration: "30".to_string(),
        warmup: "5 minutos de corda".to_string(),
        exercises: vec![oasis_core::Exercise {
            name: "Prancha".to_string(),
            sets: "3".to_string(),
            reps: "30s".to_string(),
            notes: "Abdômen contraído".to_string(),
        }],
        cooldown: "Alongamento".to_string(),
        target_goal: None,
        target_level: None,
        target_equipment: None,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use oasis_core::{AdminAccount, Equipment, Goal, Level, UserPreferences};

    fn config() -> Config {
        Config {
            admin: Some(AdminAccount {
                name: "Oasis CT".to_string(),
                username: "admoasis".to_string(),
                password: "a long admin password".to_string(),
            }),
            ..Config::default()
        }
    }

    fn studio(storage: &Arc<dyn Storage>) -> Studio {
        Studio::with_rng(
            &config(),
            storage.clone(),
            Arc::new(DisabledGenerator),
            Box::new(StdRng::seed_from_u64(3)),
        )
        .unwrap()
    }

    #[test]
    fn legacy_admin_flag_is_removed() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::with_values([(
            StorageKey::LegacyAdminSession,
            "true".to_string(),
        )]));

        studio(&storage);

        assert_eq!(storage.read(StorageKey::LegacyAdminSession).unwrap(), None);
    }

    #[test]
    fn admin_is_bootstrapped_from_config() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let studio = studio(&storage);

        let session = studio
            .auth
            .login(Credentials {
                username: "admoasis".to_string(),
                password: "a long admin password".to_string(),
            })
            .unwrap();

        assert!(session.user.is_admin);
        assert!(studio
            .content
            .update(&session.user, "hero-title", "Oasis".to_string())
            .unwrap());
    }

    #[test]
    fn state_survives_a_restart() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let first = studio(&storage);

        let ana = first
            .auth
            .register(NewPlainUser {
                name: "Ana".to_string(),
                username: "ana".to_string(),
                password: "secret".to_string(),
            })
            .unwrap()
            .user;

        let plan = first
            .templates
            .find(&UserPreferences {
                goal: Goal::LoseWeight,
                level: Level::Beginner,
                equipment: Equipment::BodyweightOnly,
                duration: "20".to_string(),
            })
            .unwrap();

        first.workouts.save(&ana, plan).unwrap();
        first.feed.toggle_like(&ana, "1").unwrap();

        let second = studio(&storage);

        assert_eq!(second.workouts.list(&ana)[0].plan.duration, "20");
        assert!(second.feed.get("1").unwrap().liked_by.contains(&ana.id));
        assert_eq!(second.templates.count(), first.templates.count());
    }

    #[test]
    fn legacy_accounts_survive_new_registrations() {
        let legacy = r#"[{
            "id": "1715000000000",
            "name": "Carla",
            "username": "carla",
            "password": "123456",
            "savedWorkouts": [{
                "planName": "Circuito em Casa",
                "difficulty": "Iniciante",
                "duration": "30",
                "warmup": "Polichinelos",
                "exercises": [{ "name": "Agachamento", "sets": "3", "reps": "15", "notes": "" }],
                "cooldown": "Alongamento"
            }]
        }, {
            "id": "1715000000001",
            "name": "Davi",
            "username": "davi"
        }]"#;

        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::with_values([(
            StorageKey::Users,
            legacy.to_string(),
        )]));
        let studio = studio(&storage);

        let carla = studio
            .auth
            .login(Credentials {
                username: "carla".to_string(),
                password: "123456".to_string(),
            })
            .unwrap()
            .user;

        assert_eq!(studio.workouts.list(&carla).len(), 1);
        assert!(matches!(
            studio.auth.login(Credentials {
                username: "davi".to_string(),
                password: String::new(),
            }),
            Err(AuthError::InvalidCredentials)
        ));

        studio
            .auth
            .register(NewPlainUser {
                name: "Ana".to_string(),
                username: "ana".to_string(),
                password: "secret".to_string(),
            })
            .unwrap();

        let stored = storage.read(StorageKey::Users).unwrap().unwrap();
        let users: Vec<UserData> = serde_json::from_str(&stored).unwrap();
        let usernames: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();

        assert!(usernames.contains(&"carla"));
        assert!(usernames.contains(&"davi"));
        assert!(usernames.contains(&"ana"));
    }

    #[test]
    fn unreadable_accounts_are_preserved() {
        let memory = Arc::new(MemoryStorage::with_values([(
            StorageKey::Users,
            r#"[{ "id": "1", "name": "Carla" "#.to_string(),
        )]));
        let storage: Arc<dyn Storage> = memory.clone();

        let studio = studio(&storage);
        studio
            .auth
            .register(NewPlainUser {
                name: "Ana".to_string(),
                username: "ana".to_string(),
                password: "secret".to_string(),
            })
            .unwrap();

        assert_eq!(
            memory.preserved(StorageKey::Users).as_deref(),
            Some(r#"[{ "id": "1", "name": "Carla" "#)
        );
    }
}
