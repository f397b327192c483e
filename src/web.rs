//! Axum web server exposing the observations API.

use anyhow::Result;
use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tracing::info;
use uuid::Uuid;

use crate::actions;
use crate::snapshot::SnapshotStore;

/// App state shared by all handlers. The store is re-read per request;
/// no snapshot data is cached here.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SnapshotStore>,
}

// Middleware for request logging with correlation ID
async fn request_logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = Uuid::new_v4().to_string()[..8].to_string();
    let start_time = Instant::now();

    info!("Started {} {} [{}]", method, path, request_id);

    let response = next.run(request).await;
    let duration = start_time.elapsed();
    let status = response.status();

    info!(
        "Completed {} {} [{}] {} in {:.2}ms",
        method,
        path,
        request_id,
        status.as_u16(),
        duration.as_secs_f64() * 1000.0
    );

    response
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1.0/observations/", get(actions::list_observations))
        .route(
            "/api/v1.0/observations/{id}",
            get(actions::get_observation),
        )
        .with_state(state)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(CorsLayer::permissive())
}

pub async fn start_web_server(
    interface: String,
    port: u16,
    store: Arc<dyn SnapshotStore>,
) -> Result<()> {
    info!("Starting web server on {}:{}", interface, port);

    let app = build_router(AppState { store });

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", interface, port)).await?;
    info!("Web server listening on http://{}:{}", interface, port);

    axum::serve(listener, app).await?;

    Ok(())
}
