use serde::Deserialize;

/// Books per catalog page.
pub const PAGE_SIZE: u32 = 12;

/// The page and search term a listing request resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationQuery {
    pub page: u32,
    pub search_term: String,
}

impl NavigationQuery {
    pub fn new(page: u32, search_term: impl Into<String>) -> Self {
        Self {
            page: page.max(1),
            search_term: search_term.into(),
        }
    }

    pub fn first_page(search_term: impl Into<String>) -> Self {
        Self::new(1, search_term)
    }

    pub fn has_search(&self) -> bool {
        !self.search_term.is_empty()
    }

    /// Listing URL for this query, e.g. `/?q=dune&page=2`.
    pub fn to_url(&self) -> String {
        self.page_url(self.page)
    }

    /// Listing URL for another page of the same search.
    pub fn page_url(&self, page: u32) -> String {
        if self.has_search() {
            format!(
                "/?q={}&page={}",
                urlencoding::encode(&self.search_term),
                page
            )
        } else {
            format!("/?page={}", page)
        }
    }
}

impl Default for NavigationQuery {
    fn default() -> Self {
        Self::first_page("")
    }
}

/// Raw `page` and `q` parameters as they arrive on the listing route.
#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    pub page: Option<String>,
    pub q: Option<String>,
}

impl ListingParams {
    /// `/` reached with neither a page nor a search term.
    pub fn is_root_entry(&self) -> bool {
        let page_missing = self.page.as_deref().map_or(true, |p| p.trim().is_empty());
        let query_missing = self.q.as_deref().map_or(true, str::is_empty);
        page_missing && query_missing
    }

    pub fn to_query(&self) -> NavigationQuery {
        NavigationQuery::new(
            parse_page(self.page.as_deref()),
            self.q.clone().unwrap_or_default(),
        )
    }
}

/// Anything that is not a positive integer falls back to page 1.
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|p| p.trim().parse::<u32>().ok())
        .unwrap_or(1)
        .max(1)
}
