use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers::{self, auth, catalog, library, player, profiles, search};
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/catalog", get(catalog::list_catalog))
        .route("/catalog/featured", get(catalog::featured))
        .route("/catalog/sections", get(catalog::sections))
        .route("/titles/:id", get(catalog::get_title))
        .route("/titles/:id/recommendations", get(catalog::recommendations))
        // Search
        .route("/search", get(search::search).delete(search::clear_search))
        .route("/search/state", get(search::search_state))
        .route("/search/filters", put(search::set_filters))
        // Session
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/auth/logout", post(auth::logout))
        .route("/session", get(auth::session))
        // Profiles
        .route(
            "/profiles",
            get(profiles::list_profiles).post(profiles::create_profile),
        )
        .route(
            "/profiles/active",
            put(profiles::switch_profile).patch(profiles::update_active_profile),
        )
        // Watchlist and progress
        .route("/watchlist", get(library::get_watchlist))
        .route(
            "/watchlist/:id",
            put(library::add_to_watchlist).delete(library::remove_from_watchlist),
        )
        .route("/progress/:id", put(library::update_progress))
        .route("/continue-watching", get(library::continue_watching))
        // Player
        .route(
            "/player",
            get(player::get_player)
                .post(player::open_player)
                .delete(player::close_player),
        )
        .route("/player/metadata", post(player::loaded_metadata))
        .route("/player/timeupdate", post(player::time_update))
        .route("/player/toggle", post(player::toggle_play))
        .route("/player/seek", post(player::seek))
        .route("/player/skip", post(player::skip))
        .route("/player/volume", put(player::set_volume))
        .route("/player/mute", post(player::toggle_mute))
        .route("/player/fullscreen", post(player::toggle_fullscreen))
        .route("/player/quality", put(player::set_quality))
        .route("/player/subtitles", post(player::toggle_subtitles))
        .route("/player/speed", put(player::set_speed))
}
