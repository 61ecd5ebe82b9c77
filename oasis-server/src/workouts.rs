use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json,
};

use crate::{
    auth::Session,
    context::ServerContext,
    errors::{ServerError, ServerResult},
    schemas::{PlanSchema, PreferencesSchema, ValidatedJson},
    serialized::{self, Recommendation, SavedWorkout, ToSerialized, Workout},
    Router,
};

#[utoipa::path(
    get,
    path = "/v1/workouts",
    tag = "workouts",
    security(
        ("BearerAuth" = [])
    ),
    responses(
        (status = 200, body = Vec<SavedWorkout>)
    )
)]
async fn list_workouts(
    session: Session,
    State(context): State<ServerContext>,
) -> Json<Vec<SavedWorkout>> {
    let saved = context.studio.workouts.list(session.user());

    Json(serialized::saved_workouts(&saved))
}

#[utoipa::path(
    post,
    path = "/v1/workouts",
    tag = "workouts",
    request_body = PlanSchema,
    security(
        ("BearerAuth" = [])
    ),
    responses(
        (status = 200, body = Vec<SavedWorkout>)
    )
)]
async fn save_workout(
    session: Session,
    State(context): State<ServerContext>,
    ValidatedJson(body): ValidatedJson<PlanSchema>,
) -> ServerResult<Json<Vec<SavedWorkout>>> {
    let workouts = &context.studio.workouts;
    workouts.save(session.user(), body.into())?;

    Ok(Json(serialized::saved_workouts(&workouts.list(session.user()))))
}

#[utoipa::path(
    delete,
    path = "/v1/workouts/{index}",
    tag = "workouts",
    security(
        ("BearerAuth" = [])
    ),
    responses(
        (status = 204),
        (status = 404)
    )
)]
async fn delete_workout(
    session: Session,
    State(context): State<ServerContext>,
    Path(index): Path<usize>,
) -> ServerResult<StatusCode> {
    if !context.studio.workouts.delete(session.user(), index)? {
        return Err(ServerError::not_found("workout", index));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/v1/trainer/recommend",
    tag = "trainer",
    request_body = PreferencesSchema,
    responses(
        (status = 200, body = Recommendation),
        (status = 503, description = "No template matched and generation failed")
    )
)]
async fn recommend(
    State(context): State<ServerContext>,
    ValidatedJson(body): ValidatedJson<PreferencesSchema>,
) -> ServerResult<Json<Recommendation>> {
    let recommendation = context.studio.trainer.recommend(&body.into()).await?;

    Ok(Json(recommendation.to_serialized()))
}

#[utoipa::path(
    get,
    path = "/v1/templates",
    tag = "trainer",
    responses(
        (status = 200, body = Vec<Workout>)
    )
)]
async fn list_templates(State(context): State<ServerContext>) -> Json<Vec<Workout>> {
    Json(context.studio.templates.list().to_serialized())
}

#[utoipa::path(
    post,
    path = "/v1/templates",
    tag = "trainer",
    request_body = PlanSchema,
    security(
        ("BearerAuth" = [])
    ),
    responses(
        (status = 201),
        (status = 403, description = "Only administrators can add templates")
    )
)]
async fn create_template(
    session: Session,
    State(context): State<ServerContext>,
    ValidatedJson(body): ValidatedJson<PlanSchema>,
) -> ServerResult<StatusCode> {
    if !context.studio.templates.save(session.user(), body.into())? {
        return Err(ServerError::Forbidden);
    }

    Ok(StatusCode::CREATED)
}

pub fn router() -> Router {
    Router::new()
        .route("/workouts", get(list_workouts).post(save_workout))
        .route("/workouts/:index", delete(delete_workout))
        .route("/trainer/recommend", post(recommend))
        .route("/templates", get(list_templates).post(create_template))
}
