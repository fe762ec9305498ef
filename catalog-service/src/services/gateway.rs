use crate::models::book::{BookDetail, ListingEnvelope, PageResult};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Upstream responded with status: {0}")]
    Status(StatusCode),
}

/// The remote book API as the catalog sees it.
#[async_trait]
pub trait CatalogGateway {
    /// A page of the listing, or of the search results when `search_term`
    /// is non-empty. Ordering and filtering are left entirely to upstream.
    async fn fetch_page(
        &self,
        page: u32,
        limit: u32,
        search_term: &str,
    ) -> Result<PageResult, GatewayError>;

    /// `Ok(None)` when upstream answers 404.
    async fn fetch_by_id(&self, id: &str) -> Result<Option<BookDetail>, GatewayError>;
}

pub struct HttpGateway {
    client: Client,
    base_url: String,
    retry: bool,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout: Duration, retry: bool) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry,
        })
    }

    fn page_url(&self, page: u32, limit: u32, search_term: &str) -> String {
        if search_term.is_empty() {
            format!("{}/books?page={}&limit={}", self.base_url, page, limit)
        } else {
            format!(
                "{}/books/search?q={}&page={}&limit={}",
                self.base_url,
                urlencoding::encode(search_term),
                page,
                limit
            )
        }
    }

    fn book_url(&self, id: &str) -> String {
        format!("{}/books/{}", self.base_url, urlencoding::encode(id))
    }

    /// GET with at most one immediate retry on transport errors and 5xx,
    /// when retries are enabled.
    async fn get(&self, url: &str) -> Result<Response, GatewayError> {
        let first = self.client.get(url).send().await;
        let retryable = match &first {
            Ok(response) => response.status().is_server_error(),
            Err(_) => true,
        };

        if !(self.retry && retryable) {
            return Ok(first?);
        }

        match &first {
            Ok(response) => warn!("Retrying {} after status {}", url, response.status()),
            Err(e) => warn!("Retrying {} after error: {}", url, e),
        }
        Ok(self.client.get(url).send().await?)
    }
}

#[async_trait]
impl CatalogGateway for HttpGateway {
    async fn fetch_page(
        &self,
        page: u32,
        limit: u32,
        search_term: &str,
    ) -> Result<PageResult, GatewayError> {
        let url = self.page_url(page, limit, search_term);
        debug!("Fetching catalog page from {}", url);

        let response = self.get(&url).await?;
        if !response.status().is_success() {
            return Err(GatewayError::Status(response.status()));
        }

        let envelope: ListingEnvelope = response.json().await?;
        Ok(envelope.into_page_result(limit))
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<BookDetail>, GatewayError> {
        let url = self.book_url(id);
        debug!("Fetching book from {}", url);

        let response = self.get(&url).await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            status => Err(GatewayError::Status(status)),
        }
    }
}
