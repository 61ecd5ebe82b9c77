use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, State},
    http::{header, request::Parts, StatusCode},
    routing::{get, post},
    Json,
};
use oasis_studio::{AuthError, Credentials, NewPlainUser, SessionData, UpdatedProfile, UserData};
use tokio::task::spawn_blocking;

use crate::{
    context::ServerContext,
    errors::{ServerError, ServerResult},
    schemas::{LoginSchema, RegisterSchema, UpdateProfileSchema, ValidatedJson},
    serialized::{LoginResult, ToSerialized, User},
    Router,
};

/// Wraps [SessionData] so [FromRequestParts] can be implemented for it
pub struct Session(SessionData);

impl Session {
    /// Returns the user of the session
    pub fn user(&self) -> &UserData {
        &self.0.user
    }

    pub fn token(&self) -> &str {
        &self.0.token
    }
}

#[async_trait]
impl FromRequestParts<ServerContext> for Session {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerContext,
    ) -> Result<Self, Self::Rejection> {
        let context = ServerContext::from_ref(state);

        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|x| x.to_str().ok())
            .ok_or(ServerError::Unauthorized("Missing authorization"))?;

        let token = bearer_token(header).ok_or_else(|| {
            ServerError::Invalid("Authorization must be Bearer <token>".to_string())
        })?;

        // Expired sessions are reported the same as unknown ones
        let session = context.studio.auth.session(token).map_err(|e| match e {
            AuthError::SessionNotFound | AuthError::UserNotFound => {
                ServerError::Unauthorized("Session does not exist or has expired")
            }
            e => e.into(),
        })?;

        Ok(Self(session))
    }
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();

    (scheme == "Bearer" && !token.is_empty() && !token.contains(' ')).then_some(token)
}

#[utoipa::path(
    post,
    path = "/v1/auth/register",
    tag = "auth",
    request_body = RegisterSchema,
    responses(
        (status = 200, body = LoginResult),
        (status = 409, description = "Username is taken")
    )
)]
async fn register(
    State(context): State<ServerContext>,
    ValidatedJson(body): ValidatedJson<RegisterSchema>,
) -> ServerResult<Json<LoginResult>> {
    // Hashing is slow, keep it off the async workers
    let session = spawn_blocking(move || {
        context.studio.auth.register(NewPlainUser {
            name: body.name,
            username: body.username,
            password: body.password,
        })
    })
    .await??;

    Ok(Json(session.to_serialized()))
}

#[utoipa::path(
    post,
    path = "/v1/auth/login",
    tag = "auth",
    request_body = LoginSchema,
    responses(
        (status = 200, body = LoginResult),
        (status = 400, description = "Username or password is incorrect")
    )
)]
async fn login(
    State(context): State<ServerContext>,
    ValidatedJson(body): ValidatedJson<LoginSchema>,
) -> ServerResult<Json<LoginResult>> {
    let session = spawn_blocking(move || {
        context.studio.auth.login(Credentials {
            username: body.username,
            password: body.password,
        })
    })
    .await??;

    Ok(Json(session.to_serialized()))
}

#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    tag = "auth",
    security(
        ("BearerAuth" = [])
    ),
    responses(
        (status = 204)
    )
)]
async fn logout(session: Session, State(context): State<ServerContext>) -> ServerResult<StatusCode> {
    context.studio.auth.logout(session.token())?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/v1/auth/user",
    tag = "auth",
    security(
        ("BearerAuth" = [])
    ),
    responses(
        (status = 200, body = User)
    )
)]
async fn user(session: Session) -> Json<User> {
    Json(session.user().to_serialized())
}

#[utoipa::path(
    patch,
    path = "/v1/auth/user",
    tag = "auth",
    request_body = UpdateProfileSchema,
    security(
        ("BearerAuth" = [])
    ),
    responses(
        (status = 200, body = User)
    )
)]
async fn update_user(
    session: Session,
    State(context): State<ServerContext>,
    ValidatedJson(body): ValidatedJson<UpdateProfileSchema>,
) -> ServerResult<Json<User>> {
    let user = context.studio.auth.update_profile(
        session.user(),
        UpdatedProfile {
            name: body.name,
            avatar: body.avatar,
        },
    )?;

    Ok(Json(user.to_serialized()))
}

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/user", get(user).patch(update_user))
}
