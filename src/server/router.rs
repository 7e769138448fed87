use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;

use super::{forms, status};
use crate::forms::FormService;
use crate::store::Store;

pub struct AppState {
    pub store: Arc<dyn Store>,
    pub forms: FormService,
}

impl AppState {
    /// Builds state around a store, with the given cap on form listings.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, list_limit: usize) -> Self {
        let forms = FormService::new(Arc::clone(&store)).with_list_limit(list_limit);
        Self { store, forms }
    }
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
        .route("/api", get(status::root))
        .route("/api/", get(status::root))
        .route(
            "/api/status",
            get(status::list_status_checks).post(status::create_status_check),
        )
        .route("/api/forms", get(forms::list_forms).post(forms::create_form))
        .route(
            "/api/forms/{id}",
            get(forms::get_form)
                .put(forms::update_form)
                .delete(forms::delete_form),
        )
        .layer(CorsLayer::very_permissive())
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
