use crate::error::CatalogError;
use crate::models::book::BookDetail;
use crate::models::navigation::NavigationQuery;
use crate::services::controller::{ListingView, GENERIC_ERROR};
use crate::services::pagination::PaginationItem;
use crate::utils::slug::book_slug;
use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::error;

pub fn render<T: Template>(status: StatusCode, template: &T) -> Response {
    match template.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            error!("Template rendering failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub struct BookCard {
    pub title: String,
    pub author: String,
    pub cover_url: Option<String>,
    pub href: String,
}

/// One rendered pagination control. `href` is `None` for the current page,
/// ellipses and targets outside the page range.
#[derive(Debug, PartialEq)]
pub struct PageLink {
    pub label: String,
    pub href: Option<String>,
    pub current: bool,
    pub kind: &'static str,
}

impl PageLink {
    fn from_item(item: PaginationItem, query: &NavigationQuery, total_pages: u32) -> Self {
        let current_page = query.page.min(total_pages);
        let target = |page: u32| (1..=total_pages).contains(&page).then(|| query.page_url(page));

        match item {
            PaginationItem::Page(page) if page == current_page => Self {
                label: page.to_string(),
                href: None,
                current: true,
                kind: "page",
            },
            PaginationItem::Page(page) => Self {
                label: page.to_string(),
                href: target(page),
                current: false,
                kind: "page",
            },
            PaginationItem::Prev(page) => Self {
                label: "← Anterior".to_string(),
                href: target(page),
                current: false,
                kind: "prev",
            },
            PaginationItem::Next(page) => Self {
                label: "Siguiente →".to_string(),
                href: target(page),
                current: false,
                kind: "next",
            },
            PaginationItem::Ellipsis => Self {
                label: "...".to_string(),
                href: None,
                current: false,
                kind: "ellipsis",
            },
        }
    }
}

#[derive(Template)]
#[template(path = "catalog.html")]
pub struct CatalogTemplate {
    pub site_name: String,
    pub search_term: String,
    pub page: u32,
    pub total_count: u64,
    pub books: Vec<BookCard>,
    pub links: Vec<PageLink>,
    pub error: Option<&'static str>,
}

impl CatalogTemplate {
    pub fn new(site_name: &str, view: ListingView) -> Self {
        let query = &view.query;
        let books = view
            .items
            .iter()
            .map(|book| {
                let mut href = format!("/select/{}?page={}", book_slug(book), query.page);
                if query.has_search() {
                    href.push_str(&format!("&q={}", urlencoding::encode(&query.search_term)));
                }
                BookCard {
                    title: book.title.clone(),
                    author: book.author.clone(),
                    cover_url: book.cover_url.clone(),
                    href,
                }
            })
            .collect();
        let links = view
            .pagination
            .iter()
            .map(|item| PageLink::from_item(*item, query, view.total_pages))
            .collect();

        Self {
            site_name: site_name.to_string(),
            search_term: query.search_term.clone(),
            page: query.page,
            total_count: view.total_count,
            books,
            links,
            error: view.error,
        }
    }
}

#[derive(Template)]
#[template(path = "book.html")]
pub struct BookTemplate {
    pub site_name: String,
    pub title: String,
    pub author: String,
    pub cover_url: Option<String>,
    pub synopsis: Option<String>,
    pub rating: Option<String>,
    pub review_count: Option<u64>,
    pub download_url: Option<String>,
    pub file_type: String,
}

impl BookTemplate {
    pub fn new(site_name: &str, book: BookDetail) -> Self {
        Self {
            site_name: site_name.to_string(),
            title: book.title,
            author: book.author,
            cover_url: book.cover_url,
            synopsis: book.synopsis,
            rating: book.average_rating.map(|rating| format!("{:.1}", rating)),
            review_count: book.review_count,
            download_url: book.download_url,
            file_type: book.file_type.unwrap_or_else(|| "PDF".to_string()),
        }
    }
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub message: &'static str,
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        match self {
            CatalogError::NotFound | CatalogError::MalformedRoute(_) => {
                render(StatusCode::NOT_FOUND, &NotFoundTemplate {})
            }
            CatalogError::UpstreamUnavailable(_) => render(
                StatusCode::BAD_GATEWAY,
                &ErrorTemplate {
                    message: GENERIC_ERROR,
                },
            ),
        }
    }
}
