use std::borrow::BorrowMut;

use axum::{response::IntoResponse, Json};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipauto::utoipauto;

#[utoipauto(paths = "./oasis-server/src")]
#[derive(OpenApi)]
#[openapi(
    modifiers(&Security),
    info(
        title = "oasis API",
        description = "oasis-server exposes the site content, blog, accounts and workout trainer of the Oasis CT studio",
        contact(name = "Oasis CT")
    ),
    tags(
        (name = "auth", description = "Accounts and login sessions"),
        (name = "content", description = "Editable texts, images and prices of the site"),
        (name = "catalog", description = "Classes, weekly schedule and membership plans"),
        (name = "posts", description = "The studio blog"),
        (name = "workouts", description = "Workouts saved by the logged in user"),
        (name = "trainer", description = "Recommendations and the template bank")
    ))
]
pub struct ApiDoc;

struct Security;

impl Modify for Security {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.borrow_mut() {
            let scheme = HttpBuilder::new()
                .scheme(HttpAuthScheme::Bearer)
                .bearer_format("Bearer <token>")
                .build();

            components.add_security_scheme("BearerAuth", SecurityScheme::Http(scheme))
        }
    }
}

pub async fn docs() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
