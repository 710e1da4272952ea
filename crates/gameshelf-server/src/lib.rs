pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod health;
pub mod state;
pub mod store;
pub mod upload;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use tower_http::services::ServeDir;

use config::ServerConfig;
use state::AppState;

/// Build the Axum router and application state from a config.
pub fn build_app(config: ServerConfig) -> (Router<()>, AppState) {
    let web_root = config.web_root.clone();
    let upload_dir = config.storage.upload_dir.clone();
    let state = AppState::new(config);

    // Uploads carry no size limit; the extension allow-list is the only gate.
    let api_routes = Router::new()
        .route(
            "/games",
            axum::routing::get(api::list_games).post(api::create_game),
        )
        .route("/games/{id}", axum::routing::get(api::get_game))
        .layer(DefaultBodyLimit::disable());

    let app = Router::new()
        .route("/health", axum::routing::get(health::health_check))
        .nest("/api/v1", api_routes)
        .nest_service("/uploads", ServeDir::new(&upload_dir))
        .fallback_service(ServeDir::new(&web_root))
        .with_state(state.clone());

    (app, state)
}
