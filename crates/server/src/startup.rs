use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, ServerState};
use service::{runtime, FileUserRepository, UserManager};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the file-backed store named by the configuration and wire the service.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    runtime::ensure_env(&cfg.storage.users_file).await?;
    let repo = FileUserRepository::new(cfg.storage.users_file.clone()).await?;
    info!(path = %repo.path().display(), "user store ready");
    Ok(ServerState::new(Arc::new(UserManager::new(repo))))
}

pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let state = build_state(cfg).await?;
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and run the HTTP server until `shutdown` resolves.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg).await?;

    let addr = cfg.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "user service listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}
