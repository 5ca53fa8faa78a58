//! Parts Interchange Buddy Web GUI
//!
//! One page, two forms and a results panel, kept on the server.
//!
//! - **HTMX for Reactivity**: every control posts its value and gets the
//!   re-rendered fragment back
//! - **Page per Browser**: state lives in [`AppState`] keyed by the
//!   `interchange_session` cookie
//! - **JSON API**: catalog lookups and a stateless search for scripts

pub mod handlers;
pub mod routes;
pub mod state;
pub mod templates;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_cookies::CookieManagerLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::{AppState, SESSION_IDLE_TTL};

/// How often idle page sessions are swept.
const REAP_INTERVAL: Duration = Duration::from_secs(60);

/// Create the main router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let page_routes = Router::new()
        .route("/", get(handlers::index))
        .route("/static/style.css", get(handlers::style_css))
        // HTMX partials
        .route("/htmx/vehicle/:field", post(handlers::vehicle_select))
        .route("/htmx/part/:field", post(handlers::part_update))
        .route("/htmx/search", post(handlers::search))
        .route("/htmx/copy", post(handlers::copy))
        .route("/htmx/results", get(handlers::results_partial));

    let api_routes = Router::new()
        .route("/api/health", get(handlers::api_health))
        .route("/api/catalog/years", get(handlers::api_years))
        .route("/api/catalog/makes", get(handlers::api_makes))
        .route("/api/catalog/models", get(handlers::api_models))
        .route("/api/catalog/categories", get(handlers::api_categories))
        .route("/api/catalog/parts", get(handlers::api_parts))
        .route("/api/search", post(handlers::api_search));

    Router::new()
        .merge(page_routes)
        .merge(api_routes)
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the web server
pub async fn serve(state: Arc<AppState>, addr: &str) -> std::io::Result<()> {
    let app = create_router(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Parts Interchange Buddy listening on http://{}", addr);

    let reaper = tokio::spawn(async move {
        let mut tick = tokio::time::interval(REAP_INTERVAL);
        loop {
            tick.tick().await;
            let dropped = state.cleanup_idle(SESSION_IDLE_TTL);
            if dropped > 0 {
                tracing::debug!(dropped, "reaped idle page sessions");
            }
        }
    });

    let served = axum::serve(listener, app).await;
    reaper.abort();
    served
}
