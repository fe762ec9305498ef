use crate::models::navigation::{parse_page, NavigationQuery};
use crate::services::controller::CatalogController;
use crate::utils::cookies::CookieSession;
use crate::SharedState;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_cookies::Cookies;
use tracing::info;

/// Search form fields: the typed input plus the listing it was submitted from.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub active: Option<String>,
    pub page: Option<String>,
}

pub async fn submit_search(
    State(state): State<SharedState>,
    cookies: Cookies,
    Query(params): Query<SearchParams>,
) -> Response {
    let active = NavigationQuery::new(
        parse_page(params.page.as_deref()),
        params.active.unwrap_or_default(),
    );
    let input = params.q.unwrap_or_default();

    let mut controller =
        CatalogController::new(state.gateway.as_ref(), CookieSession::new(cookies));

    let target = match controller.submit_search(&active, &input) {
        Some(query) => {
            info!("New search {:?}", query.search_term);
            query
        }
        None => active,
    };

    Redirect::to(&target.to_url()).into_response()
}

pub async fn clear_search(State(state): State<SharedState>, cookies: Cookies) -> Response {
    let mut controller =
        CatalogController::new(state.gateway.as_ref(), CookieSession::new(cookies));
    let target = controller.clear_search();

    Redirect::to(&target.to_url()).into_response()
}
