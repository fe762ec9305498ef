use crate::services::gateway::GatewayError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] GatewayError),
    #[error("Book not found")]
    NotFound,
    #[error("Malformed book route: {0}")]
    MalformedRoute(String),
}
