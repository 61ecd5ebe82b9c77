use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json,
};
use oasis_studio::NewPost;

use crate::{
    auth::Session,
    context::ServerContext,
    errors::{ServerError, ServerResult},
    schemas::{CommentSchema, NewPostSchema, ValidatedJson},
    serialized::{Comment, Post, ToSerialized},
    Router,
};

#[utoipa::path(
    get,
    path = "/v1/posts",
    tag = "posts",
    responses(
        (status = 200, body = Vec<Post>)
    )
)]
async fn list_posts(State(context): State<ServerContext>) -> Json<Vec<Post>> {
    Json(context.studio.feed.list().to_serialized())
}

#[utoipa::path(
    get,
    path = "/v1/posts/{id}",
    tag = "posts",
    responses(
        (status = 200, body = Post),
        (status = 404)
    )
)]
async fn post_by_id(
    State(context): State<ServerContext>,
    Path(id): Path<String>,
) -> ServerResult<Json<Post>> {
    let post = context
        .studio
        .feed
        .get(&id)
        .ok_or_else(|| ServerError::not_found("post", id))?;

    Ok(Json(post.to_serialized()))
}

#[utoipa::path(
    post,
    path = "/v1/posts",
    tag = "posts",
    request_body = NewPostSchema,
    security(
        ("BearerAuth" = [])
    ),
    responses(
        (status = 200, body = Post)
    )
)]
async fn create_post(
    session: Session,
    State(context): State<ServerContext>,
    ValidatedJson(body): ValidatedJson<NewPostSchema>,
) -> ServerResult<Json<Post>> {
    let post = context.studio.feed.add_post(
        session.user(),
        NewPost {
            title: body.title,
            category: body.category,
            content: body.content,
            image: body.image,
        },
    )?;

    Ok(Json(post.to_serialized()))
}

#[utoipa::path(
    delete,
    path = "/v1/posts/{id}",
    tag = "posts",
    security(
        ("BearerAuth" = [])
    ),
    responses(
        (status = 204),
        (status = 403, description = "Only the author or an administrator can delete a post"),
        (status = 404)
    )
)]
async fn delete_post(
    session: Session,
    State(context): State<ServerContext>,
    Path(id): Path<String>,
) -> ServerResult<StatusCode> {
    let feed = &context.studio.feed;

    if feed.get(&id).is_none() {
        return Err(ServerError::not_found("post", id));
    }

    if !feed.delete_post(session.user(), &id)? {
        return Err(ServerError::Forbidden);
    }

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/v1/posts/{id}/like",
    tag = "posts",
    security(
        ("BearerAuth" = [])
    ),
    responses(
        (status = 200, body = Post),
        (status = 404)
    )
)]
async fn toggle_like(
    session: Session,
    State(context): State<ServerContext>,
    Path(id): Path<String>,
) -> ServerResult<Json<Post>> {
    let post = context
        .studio
        .feed
        .toggle_like(session.user(), &id)?
        .ok_or_else(|| ServerError::not_found("post", id))?;

    Ok(Json(post.to_serialized()))
}

#[utoipa::path(
    post,
    path = "/v1/posts/{id}/comments",
    tag = "posts",
    request_body = CommentSchema,
    security(
        ("BearerAuth" = [])
    ),
    responses(
        (status = 200, body = Comment),
        (status = 404)
    )
)]
async fn add_comment(
    session: Session,
    State(context): State<ServerContext>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<CommentSchema>,
) -> ServerResult<Json<Comment>> {
    let comment = context
        .studio
        .feed
        .add_comment(session.user(), &id, body.content)?
        .ok_or_else(|| ServerError::not_found("post", id))?;

    Ok(Json(comment.to_serialized()))
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/:id", get(post_by_id).delete(delete_post))
        .route("/:id/like", post(toggle_like))
        .route("/:id/comments", post(add_comment))
}
