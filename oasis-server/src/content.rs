use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    routing::get,
    Json,
};
use oasis_core::catalog;

use crate::{
    auth::Session,
    context::ServerContext,
    errors::{ServerError, ServerResult},
    schemas::{ContentSchema, ValidatedJson},
    serialized::{self, Class, MembershipPlan, ScheduleDay, ToSerialized},
    Router,
};

#[utoipa::path(
    get,
    path = "/v1/content",
    tag = "content",
    responses(
        (status = 200, body = BTreeMap<String, String>)
    )
)]
async fn all_content(State(context): State<ServerContext>) -> Json<BTreeMap<String, String>> {
    Json(context.studio.content.get_all())
}

#[utoipa::path(
    get,
    path = "/v1/content/{key}",
    tag = "content",
    responses(
        (status = 200, body = String),
        (status = 404)
    )
)]
async fn content(
    State(context): State<ServerContext>,
    Path(key): Path<String>,
) -> ServerResult<Json<String>> {
    context
        .studio
        .content
        .get(&key)
        .map(Json)
        .ok_or_else(|| ServerError::not_found("content", key))
}

#[utoipa::path(
    put,
    path = "/v1/content/{key}",
    tag = "content",
    request_body = ContentSchema,
    security(
        ("BearerAuth" = [])
    ),
    responses(
        (status = 200, body = String),
        (status = 403, description = "Only administrators can edit content")
    )
)]
async fn update_content(
    session: Session,
    State(context): State<ServerContext>,
    Path(key): Path<String>,
    ValidatedJson(body): ValidatedJson<ContentSchema>,
) -> ServerResult<Json<String>> {
    let updated = context
        .studio
        .content
        .update(session.user(), &key, body.value.clone())?;

    if !updated {
        return Err(ServerError::Forbidden);
    }

    Ok(Json(body.value))
}

#[utoipa::path(
    get,
    path = "/v1/classes",
    tag = "catalog",
    responses(
        (status = 200, body = Vec<Class>)
    )
)]
async fn classes(State(context): State<ServerContext>) -> Json<Vec<Class>> {
    let classes = catalog::classes()
        .iter()
        .map(|c| serialized::class(c, context.studio.content.get(c.image_key)))
        .collect();

    Json(classes)
}

#[utoipa::path(
    get,
    path = "/v1/schedule",
    tag = "catalog",
    responses(
        (status = 200, body = Vec<ScheduleDay>)
    )
)]
async fn schedule() -> Json<Vec<ScheduleDay>> {
    Json(catalog::schedule().to_serialized())
}

#[utoipa::path(
    get,
    path = "/v1/membership",
    tag = "catalog",
    responses(
        (status = 200, body = Vec<MembershipPlan>)
    )
)]
async fn membership(State(context): State<ServerContext>) -> Json<Vec<MembershipPlan>> {
    let content = context.studio.content.get_all();

    Json(catalog::membership_plans(&content).to_serialized())
}

pub fn router() -> Router {
    Router::new()
        .route("/content", get(all_content))
        .route("/content/:key", get(content).put(update_content))
        .route("/classes", get(classes))
        .route("/schedule", get(schedule))
        .route("/membership", get(membership))
}
