use serde::{Deserialize, Serialize};

/// One card of the catalog grid, as returned by the listing and search endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "autor", default)]
    pub author: String,
    #[serde(rename = "portada", default)]
    pub cover_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDetail {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "autor", default)]
    pub author: String,
    #[serde(rename = "portada", default)]
    pub cover_url: Option<String>,
    #[serde(rename = "sinopsis", default)]
    pub synopsis: Option<String>,
    #[serde(rename = "averageRating", default)]
    pub average_rating: Option<f64>,
    #[serde(rename = "reviewCount", default)]
    pub review_count: Option<u64>,
    #[serde(rename = "link", default)]
    pub download_url: Option<String>,
    #[serde(rename = "fileType", default)]
    pub file_type: Option<String>,
}

/// One page of results. Items keep the upstream order.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub items: Vec<BookSummary>,
    pub total_count: u64,
    pub total_pages: u32,
}

impl PageResult {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            total_pages: 1,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingMetadata {
    #[serde(rename = "totalPages", default)]
    pub total_pages: Option<u32>,
    #[serde(rename = "totalCount", default)]
    pub total_count: Option<u64>,
}

/// Raw `{data, metadata}` body of `/books` and `/books/search`.
#[derive(Debug, Deserialize)]
pub struct ListingEnvelope {
    #[serde(default)]
    pub data: Vec<BookSummary>,
    #[serde(default)]
    pub metadata: Option<ListingMetadata>,
}

impl ListingEnvelope {
    /// Upstream `totalPages` is trusted when it is at least 1; otherwise it is
    /// recomputed from `totalCount` and the page size.
    pub fn into_page_result(self, limit: u32) -> PageResult {
        let metadata = self.metadata.unwrap_or_default();
        let total_count = metadata.total_count.unwrap_or(0);
        let total_pages = match metadata.total_pages {
            Some(pages) if pages >= 1 => pages,
            _ => {
                let limit = u64::from(limit.max(1));
                let computed = total_count.div_ceil(limit).max(1);
                u32::try_from(computed).unwrap_or(u32::MAX)
            }
        };

        PageResult {
            items: self.data,
            total_count,
            total_pages,
        }
    }
}
