mod auth;
mod content;
mod context;
mod docs;
mod errors;
mod posts;
mod schemas;
mod serialized;
mod workouts;

use std::{
    io,
    net::{Ipv6Addr, SocketAddr},
    sync::Arc,
};

use axum::routing::get;
use log::info;
use oasis_studio::Studio;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

pub use context::ServerContext;

pub type Router = axum::Router<ServerContext>;

/// Starts the oasis server
pub async fn run_server(studio: Arc<Studio>, port: u16) -> io::Result<()> {
    let addr: SocketAddr = (Ipv6Addr::UNSPECIFIED, port).into();
    let listener = TcpListener::bind(&addr).await?;

    info!("Listening on {}", addr);

    axum::serve(listener, app(ServerContext { studio })).await
}

fn app(context: ServerContext) -> axum::Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let version_one_router = Router::new()
        .nest("/auth", auth::router())
        .nest("/posts", posts::router())
        .merge(content::router())
        .merge(workouts::router());

    Router::new()
        .nest("/v1", version_one_router)
        .route("/api.json", get(docs::docs))
        .layer(cors)
        .with_state(context)
}
