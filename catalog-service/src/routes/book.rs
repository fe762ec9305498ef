use crate::error::CatalogError;
use crate::routes::views::{render, BookTemplate};
use crate::services::controller::load_book;
use crate::SharedState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use tracing::info;

pub async fn show_book(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> Result<Response, CatalogError> {
    info!("Book detail {}", slug);

    let book = load_book(state.gateway.as_ref(), &slug).await?;
    Ok(render(
        StatusCode::OK,
        &BookTemplate::new(&state.config.site_name, book),
    ))
}
