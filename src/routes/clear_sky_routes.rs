use axum::{Router, routing::{get, post}};
use crate::controllers::clear_sky_controller::{
    // Model evaluation
    compute_clear_sky, compute_clear_sky_batch, compute_site_clear_sky,
    // Configuration
    list_sites, get_default_atmosphere,
    // Service
    get_health,
};
use crate::shared_state::AppState;

/// Build the `/api/*` sub-router.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/clear-sky",             post(compute_clear_sky))
        .route("/clear-sky/batch",       post(compute_clear_sky_batch))
        .route("/sites",                 get(list_sites))
        .route("/sites/{id}/clear-sky",  post(compute_site_clear_sky))
        .route("/atmosphere/defaults",   get(get_default_atmosphere))
        .route("/health",                get(get_health))
        .with_state(state)
}
