use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use oasis_studio::{AuthError, StorageError, StoreError, TrainerError};
use thiserror::Error;
use tokio::task::JoinError;

pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{resource}:{identifier} not found")]
    NotFound {
        resource: &'static str,
        identifier: String,
    },
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("You are not allowed to do that")]
    Forbidden,
    #[error("{0}")]
    Invalid(String),
    #[error("{0}")]
    Unavailable(String),
    #[error("Unknown internal error: {0}")]
    Unknown(String),
}

impl ServerError {
    fn as_status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InvalidCredentials(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Invalid(_) => StatusCode::BAD_REQUEST,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn not_found(resource: &'static str, identifier: impl ToString) -> Self {
        Self::NotFound {
            resource,
            identifier: identifier.to_string(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.as_status_code();

        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        (status, self.to_string()).into_response()
    }
}

impl From<AuthError> for ServerError {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::InvalidCredentials => Self::InvalidCredentials(value.to_string()),
            AuthError::Conflict(_) => Self::Conflict(value.to_string()),
            AuthError::MissingFields => Self::Invalid(value.to_string()),
            AuthError::UserNotFound | AuthError::SessionNotFound => {
                Self::not_found("user", "session")
            }
            e => Self::Unknown(e.to_string()),
        }
    }
}

impl From<StoreError> for ServerError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Validation(message) => Self::Invalid(message),
            StoreError::NotFound { resource } => Self::not_found(resource, "current"),
            StoreError::Storage(e) => e.into(),
        }
    }
}

impl From<StorageError> for ServerError {
    fn from(value: StorageError) -> Self {
        Self::Unknown(value.to_string())
    }
}

impl From<TrainerError> for ServerError {
    fn from(value: TrainerError) -> Self {
        Self::Unavailable(value.to_string())
    }
}

impl From<JoinError> for ServerError {
    fn from(value: JoinError) -> Self {
        Self::Unknown(value.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn auth_errors_map_to_statuses() {
        let conflict: ServerError = AuthError::Conflict("ana".to_string()).into();
        let credentials: ServerError = AuthError::InvalidCredentials.into();
        let missing: ServerError = AuthError::MissingFields.into();

        assert_eq!(conflict.as_status_code(), StatusCode::CONFLICT);
        assert_eq!(conflict.to_string(), "Nome de usuário já existe.");
        assert_eq!(credentials.as_status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(missing.as_status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_errors_map_to_statuses() {
        let invalid: ServerError = StoreError::Validation("vazio".to_string()).into();
        let missing: ServerError = StoreError::NotFound { resource: "user" }.into();

        assert_eq!(invalid.as_status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(missing.as_status_code(), StatusCode::NOT_FOUND);
    }
}
