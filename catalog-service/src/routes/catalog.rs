use crate::models::navigation::ListingParams;
use crate::routes::views::{render, CatalogTemplate};
use crate::services::controller::{CatalogController, ListingOutcome};
use crate::utils::cookies::CookieSession;
use crate::SharedState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::Cookies;

pub async fn list_books(
    State(state): State<SharedState>,
    cookies: Cookies,
    Query(params): Query<ListingParams>,
) -> Response {
    let mut controller =
        CatalogController::new(state.gateway.as_ref(), CookieSession::new(cookies));

    match controller.enter_listing(&params).await {
        ListingOutcome::Redirect(url) => Redirect::to(&url).into_response(),
        ListingOutcome::Render(view) => render(
            StatusCode::OK,
            &CatalogTemplate::new(&state.config.site_name, view),
        ),
    }
}

/// Result card activation: remembers the page the book was found on, then
/// continues to the detail page.
pub async fn select_book(
    State(state): State<SharedState>,
    cookies: Cookies,
    Path(slug): Path<String>,
    Query(params): Query<ListingParams>,
) -> Response {
    let mut controller =
        CatalogController::new(state.gateway.as_ref(), CookieSession::new(cookies));
    controller.select_item(&params.to_query());

    let target = format!("/seeBook/{}", urlencoding::encode(&slug));
    Redirect::to(&target).into_response()
}
