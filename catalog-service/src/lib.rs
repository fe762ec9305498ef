pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use axum::{routing::get, Router};
use crate::config::Config;
use crate::services::gateway::CatalogGateway;
use std::sync::Arc;
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;

pub type Gateway = Arc<dyn CatalogGateway + Send + Sync>;

pub struct AppState {
    pub config: Config,
    pub gateway: Gateway,
}

pub type SharedState = Arc<AppState>;

pub fn app(state: SharedState) -> Router {
    Router::new()
        .route("/", get(routes::catalog::list_books))
        .route("/select/:slug", get(routes::catalog::select_book))
        .route("/search", get(routes::search::submit_search))
        .route("/search/clear", get(routes::search::clear_search))
        .route("/seeBook/:slug", get(routes::book::show_book))
        .route("/status", get(routes::health::health_check))
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
