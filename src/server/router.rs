use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{
    Router,
    routing::{get, post},
};

use super::notifications::post_notification;
use crate::store::Store;
use crate::telegram::Messenger;

pub struct AppState {
    pub store: Arc<dyn Store>,
    pub messenger: Arc<dyn Messenger>,
    /// Shared secret the request token is derived from.
    pub access_token: String,
}

async fn health() -> &'static str {
    "OK"
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {}ms",
        method,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/notification", post(post_notification))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
