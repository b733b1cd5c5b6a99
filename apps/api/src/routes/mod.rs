pub mod health;
pub mod layers;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::profile::auth::require_basic_auth;
use crate::profile::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let auth = middleware::from_fn_with_state(state.clone(), require_basic_auth);
    let static_dir = state.config.static_dir.clone();

    let router = Router::new()
        .route("/health", get(health::health_handler))
        // Writes are gated; the layer only covers methods registered before it.
        .route(
            "/profile",
            post(handlers::handle_create_profile)
                .put(handlers::handle_replace_profile)
                .route_layer(auth)
                .get(handlers::handle_get_profile),
        )
        .route("/projects", get(handlers::handle_list_projects))
        .route("/skills/top", get(handlers::handle_top_skills))
        .route("/search", get(handlers::handle_search))
        .with_state(state);

    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}
