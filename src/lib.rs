//! Daily Diet API - a small meal tracking REST service.
//!
//! Users register, log in via a cookie-carried user id, and record meals
//! tagged as diet-compliant or not. `GET /meals/metrics` aggregates a user's
//! history, including the longest streak of diet-compliant meals.

use axum::{extract::State, middleware::from_fn, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod state;

use state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(user_routes())
        .merge(meal_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn user_routes() -> Router<AppState> {
    use axum::routing::{delete, post, put};
    use handlers::users;

    Router::new()
        .route("/users", get(users::list).post(users::create))
        .route("/users/login", post(users::login))
        .route("/users/:id", put(users::update).delete(users::delete))
}

fn meal_routes() -> Router<AppState> {
    use handlers::meals;

    Router::new()
        .route("/meals", get(meals::list).post(meals::create))
        .route("/meals/metrics", get(meals::metrics))
        .route(
            "/meals/:id",
            get(meals::get).put(meals::update).delete(meals::delete),
        )
        // Meal routes are scoped to the cookie-carried user
        .layer(from_fn(middleware::session_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Daily Diet API",
            "version": version,
            "description": "Meal tracking REST service with per-user diet metrics",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "users": "/users, /users/:id, /users/login (public)",
                "meals": "/meals, /meals/:id (session cookie required)",
                "metrics": "/meals/metrics (session cookie required)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::health_check(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
