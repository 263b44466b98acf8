use std::sync::Arc;

use axum::{routing::get, Json, Router};
use service::UserService;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

pub mod users;

/// Shared handler state: the user service behind its trait, so tests can
/// swap in any implementation.
#[derive(Clone)]
pub struct ServerState {
    pub users: Arc<dyn UserService>,
}

impl ServerState {
    pub fn new(users: Arc<dyn UserService>) -> Self { Self { users } }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the application router: health plus the user CRUD endpoints.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let user_routes = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user).patch(users::update_user).delete(users::delete_user),
        );

    Router::new()
        .route("/health", get(health))
        .merge(user_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
