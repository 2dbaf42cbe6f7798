pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use state::AppState;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (no token required)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Practice routes carry audio uploads
    let practice_routes = Router::new()
        .route("/", post(routes::practice::practice))
        .layer(DefaultBodyLimit::max(max_upload_bytes));

    let challenge_routes = Router::new()
        .route("/", get(routes::challenge::list))
        .route("/{challenge_id}", get(routes::challenge::get))
        .route("/{challenge_id}/practice", post(routes::challenge::practice))
        .layer(DefaultBodyLimit::max(max_upload_bytes));

    let api = Router::new()
        .nest("/auth", auth_routes)
        .nest("/practice", practice_routes)
        .nest("/challenge", challenge_routes)
        .route("/leaderboard", get(routes::leaderboard::leaderboard))
        .route("/history", get(routes::history::history))
        .route("/profile", get(routes::profile::profile));

    // Health check
    let health = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api)
        .merge(health)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
