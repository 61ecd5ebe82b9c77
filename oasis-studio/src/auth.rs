use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use log::{info, warn};
use oasis_core::{time_based_id, AdminAccount};
use rand::rngs::OsRng;
use std::sync::Arc;
use thiserror::Error;

use crate::{
    util::{is_blank, random_string},
    Persisted, RecordId, SessionData, Storage, StorageError, StorageKey, StoredSession, UserData,
};

pub type Users = Arc<Persisted<Vec<UserData>>>;

/// Handles accounts and login sessions
pub struct Auth {
    users: Users,
    sessions: Persisted<Vec<StoredSession>>,
    argon: Argon2<'static>,
    session_duration: Duration,
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password is incorrect
    #[error("Usuário ou senha incorretos.")]
    InvalidCredentials,
    #[error("Preencha todos os campos.")]
    MissingFields,
    #[error("Nome de usuário já existe.")]
    Conflict(String),
    #[error("Session does not exist")]
    SessionNotFound,
    #[error("User does not exist")]
    UserNotFound,
    #[error("HashError: {0}")]
    HashError(String),
    /// Something went wrong while persisting
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl Auth {
    const TOKEN_LENGTH: usize = 32;

    pub fn new(
        storage: &Arc<dyn Storage>,
        users: &Users,
        session_duration_in_days: i64,
    ) -> Result<Self, StorageError> {
        Ok(Self {
            users: users.clone(),
            sessions: Persisted::load(storage, StorageKey::Sessions, vec![])?,
            argon: Argon2::default(),
            session_duration: Duration::days(session_duration_in_days),
        })
    }

    /// Logs in a user, returning a new session
    pub fn login(&self, credentials: Credentials) -> Result<SessionData, AuthError> {
        self.clear_expired()?;

        let user = self
            .user_by_username(&credentials.username)
            .ok_or(AuthError::InvalidCredentials)?;

        if user.password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        match PasswordHash::new(&user.password) {
            Ok(stored_password) => self
                .argon
                .verify_password(credentials.password.as_bytes(), &stored_password)
                .map_err(|_| AuthError::InvalidCredentials)?,
            // Accounts from before passwords were hashed
            Err(_) => {
                if user.password != credentials.password {
                    return Err(AuthError::InvalidCredentials);
                }

                self.upgrade_legacy_password(&user.id, &credentials.password)?;
            }
        }

        self.create_session(&user.id)
    }

    /// Deletes the associated session, returning whether it existed
    pub fn logout(&self, token: &str) -> Result<bool, AuthError> {
        let removed = self.sessions.update_if(|sessions| {
            let index = sessions.iter().position(|s| s.token == token)?;
            sessions.remove(index);
            Some(())
        })?;

        Ok(removed.is_some())
    }

    /// Creates a basic user and logs them in
    pub fn register(&self, new_user: NewPlainUser) -> Result<SessionData, AuthError> {
        let user = self.create_user(new_user, false)?;

        info!("Registered user {}", user.username);
        self.create_session(&user.id)
    }

    /// Creates the administrator account if it doesn't already exist.
    /// Returns true if it was created.
    pub fn ensure_admin(&self, account: &AdminAccount) -> Result<bool, AuthError> {
        if let Some(existing) = self.user_by_username(&account.username) {
            if !existing.is_admin {
                warn!(
                    "Configured admin {} exists but is not an administrator",
                    account.username
                );
            }

            return Ok(false);
        }

        self.create_user(
            NewPlainUser {
                name: account.name.clone(),
                username: account.username.clone(),
                password: account.password.clone(),
            },
            true,
        )?;

        info!("Created administrator {}", account.username);
        Ok(true)
    }

    /// Returns a session if it exists and hasn't expired
    pub fn session(&self, token: &str) -> Result<SessionData, AuthError> {
        let stored = self
            .sessions
            .read(|sessions| sessions.iter().find(|s| s.token == token).cloned())
            .filter(|s| s.expires_at > Utc::now())
            .ok_or(AuthError::SessionNotFound)?;

        let user = self.user(&stored.user_id).ok_or(AuthError::SessionNotFound)?;

        Ok(SessionData {
            token: stored.token,
            user,
            expires_at: stored.expires_at,
        })
    }

    /// Returns the current state of a user
    pub fn user(&self, user_id: &str) -> Option<UserData> {
        self.users
            .read(|users| users.iter().find(|u| u.id == user_id).cloned())
    }

    /// Updates the display name or avatar of a user.
    /// Posts and comments keep the snapshot taken when they were written.
    pub fn update_profile(
        &self,
        user: &UserData,
        update: UpdatedProfile,
    ) -> Result<UserData, AuthError> {
        if update.name.as_deref().is_some_and(is_blank) {
            return Err(AuthError::MissingFields);
        }

        self.users
            .update_if(|users| {
                let target = users.iter_mut().find(|u| u.id == user.id)?;

                if let Some(name) = update.name {
                    target.name = name;
                }

                if let Some(avatar) = update.avatar {
                    target.avatar = Some(avatar).filter(|a| !is_blank(a));
                }

                Some(target.clone())
            })?
            .ok_or(AuthError::UserNotFound)
    }

    fn user_by_username(&self, username: &str) -> Option<UserData> {
        self.users
            .read(|users| users.iter().find(|u| u.username == username).cloned())
    }

    fn create_user(&self, new_user: NewPlainUser, is_admin: bool) -> Result<UserData, AuthError> {
        if [&new_user.name, &new_user.username, &new_user.password]
            .into_iter()
            .any(|field| is_blank(field))
        {
            return Err(AuthError::MissingFields);
        }

        let hashed_password = self.hash(&new_user.password)?;

        let user = UserData {
            id: time_based_id(),
            name: new_user.name,
            username: new_user.username,
            password: hashed_password,
            is_admin,
            saved_workouts: vec![],
            avatar: None,
        };

        self.users
            .update_if(|users| {
                // Usernames are compared exactly, case included
                if users.iter().any(|u| u.username == user.username) {
                    return None;
                }

                users.push(user.clone());
                Some(user.clone())
            })?
            .ok_or_else(|| AuthError::Conflict(user.username.clone()))
    }

    fn create_session(&self, user_id: &RecordId) -> Result<SessionData, AuthError> {
        let user = self.user(user_id).ok_or(AuthError::UserNotFound)?;

        let stored = StoredSession {
            token: random_string(Self::TOKEN_LENGTH),
            user_id: user.id.clone(),
            expires_at: Utc::now() + self.session_duration,
        };

        self.sessions.update(|sessions| sessions.push(stored.clone()))?;

        Ok(SessionData {
            token: stored.token,
            user,
            expires_at: stored.expires_at,
        })
    }

    fn upgrade_legacy_password(&self, user_id: &str, password: &str) -> Result<(), AuthError> {
        let hashed_password = self.hash(password)?;

        self.users.update_if(|users| {
            let user = users.iter_mut().find(|u| u.id == user_id)?;
            user.password = hashed_password;
            Some(())
        })?;

        info!("Upgraded legacy password of user {}", user_id);
        Ok(())
    }

    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::HashError(e.to_string()))
    }

    fn clear_expired(&self) -> Result<(), AuthError> {
        let now = Utc::now();

        self.sessions.update_if(|sessions| {
            let before = sessions.len();
            sessions.retain(|s| s.expires_at > now);

            (sessions.len() != before).then_some(())
        })?;

        Ok(())
    }
}

#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug)]
pub struct NewPlainUser {
    pub name: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Default)]
pub struct UpdatedProfile {
    pub name: Option<String>,
    pub avatar: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::MemoryStorage;

    fn auth_with(storage: Arc<dyn Storage>) -> Auth {
        let users = Arc::new(Persisted::load(&storage, StorageKey::Users, vec![]).unwrap());
        Auth::new(&storage, &users, 7).unwrap()
    }

    fn auth() -> (Auth, Arc<dyn Storage>) {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        (auth_with(storage.clone()), storage)
    }

    fn ana() -> NewPlainUser {
        NewPlainUser {
            name: "Ana Souza".to_string(),
            username: "ana".to_string(),
            password: "secret".to_string(),
        }
    }

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn register_then_login() {
        let (auth, _) = auth();

        let session = auth.register(ana()).unwrap();
        assert_eq!(session.user.username, "ana");
        assert!(!session.user.is_admin);
        assert!(session.user.saved_workouts.is_empty());
        assert_ne!(session.user.password, "secret");

        assert!(auth.login(credentials("ana", "secret")).is_ok());
        assert!(matches!(
            auth.login(credentials("ana", "wrong")),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login(credentials("bruno", "secret")),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn register_logs_in_immediately() {
        let (auth, _) = auth();

        let session = auth.register(ana()).unwrap();
        let resolved = auth.session(&session.token).unwrap();

        assert_eq!(resolved.user.id, session.user.id);
    }

    #[test]
    fn usernames_are_unique_and_case_sensitive() {
        let (auth, _) = auth();

        auth.register(ana()).unwrap();

        assert!(matches!(
            auth.register(ana()),
            Err(AuthError::Conflict(_))
        ));

        let mut upper = ana();
        upper.username = "Ana".to_string();
        assert!(auth.register(upper).is_ok());
    }

    #[test]
    fn blank_fields_are_rejected() {
        let (auth, _) = auth();

        let mut user = ana();
        user.name = "  ".to_string();

        assert!(matches!(auth.register(user), Err(AuthError::MissingFields)));
    }

    #[test]
    fn logout_only_removes_that_session() {
        let (auth, _) = auth();

        let first = auth.register(ana()).unwrap();
        let second = auth.login(credentials("ana", "secret")).unwrap();

        assert!(auth.logout(&first.token).unwrap());
        assert!(!auth.logout(&first.token).unwrap());

        assert!(matches!(
            auth.session(&first.token),
            Err(AuthError::SessionNotFound)
        ));
        assert!(auth.session(&second.token).is_ok());
    }

    #[test]
    fn sessions_and_users_survive_a_restart() {
        let (auth, storage) = auth();
        let session = auth.register(ana()).unwrap();

        let restarted = auth_with(storage);

        assert_eq!(
            restarted.session(&session.token).unwrap().user.username,
            "ana"
        );
        assert!(restarted.login(credentials("ana", "secret")).is_ok());
    }

    #[test]
    fn expired_sessions_are_rejected_and_cleared() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let users = Arc::new(Persisted::load(&storage, StorageKey::Users, vec![]).unwrap());
        let auth = Auth::new(&storage, &users, -1).unwrap();

        let session = auth.register(ana()).unwrap();

        assert!(matches!(
            auth.session(&session.token),
            Err(AuthError::SessionNotFound)
        ));

        auth.login(credentials("ana", "secret")).unwrap();
        assert_eq!(auth.sessions.get().len(), 1);
    }

    #[test]
    fn admin_is_created_once() {
        let (auth, _) = auth();
        let account = AdminAccount {
            name: "Oasis CT".to_string(),
            username: "admoasis".to_string(),
            password: "a long admin password".to_string(),
        };

        assert!(auth.ensure_admin(&account).unwrap());
        assert!(!auth.ensure_admin(&account).unwrap());

        let session = auth
            .login(credentials("admoasis", "a long admin password"))
            .unwrap();
        assert!(session.user.is_admin);
    }

    #[test]
    fn legacy_plaintext_passwords_are_upgraded() {
        let legacy = r#"[{
            "id": "1700000000000",
            "name": "Carla",
            "username": "carla",
            "password": "123456",
            "isAdmin": false,
            "savedWorkouts": []
        }]"#;

        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::with_values([(
            StorageKey::Users,
            legacy.to_string(),
        )]));

        let auth = auth_with(storage);

        assert!(auth.login(credentials("carla", "nope")).is_err());
        assert!(auth.login(credentials("carla", "123456")).is_ok());

        let upgraded = auth.user("1700000000000").unwrap();
        assert!(PasswordHash::new(&upgraded.password).is_ok());
        assert!(auth.login(credentials("carla", "123456")).is_ok());
    }

    #[test]
    fn profile_updates_change_the_user() {
        let (auth, _) = auth();
        let session = auth.register(ana()).unwrap();

        let updated = auth
            .update_profile(
                &session.user,
                UpdatedProfile {
                    name: Some("Ana S.".to_string()),
                    avatar: Some("https://example.com/ana.png".to_string()),
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Ana S.");
        assert_eq!(auth.session(&session.token).unwrap().user.name, "Ana S.");
    }
}
