use crate::error::CatalogError;
use crate::models::book::{BookDetail, BookSummary, PageResult};
use crate::models::navigation::{ListingParams, NavigationQuery, PAGE_SIZE};
use crate::services::gateway::CatalogGateway;
use crate::services::pagination::{plan, PaginationItem, DEFAULT_WINDOW};
use crate::services::session::{NavigationState, SessionStorage};
use crate::utils::slug::extract_book_id;
use tracing::{error, info, warn};

pub const GENERIC_ERROR: &str =
    "No se pudieron cargar los datos del catálogo. Por favor, inténtalo de nuevo más tarde.";

/// Whether a listing navigation is in flight.
///
/// Both hooks are idempotent, so a cycle that never settled does not leave
/// the flag stuck for the next one.
#[derive(Debug, Default)]
pub struct LoadingFlag {
    active: bool,
}

impl LoadingFlag {
    /// Only listing URLs (`/?page=..`, `/?q=..`) count as catalog navigations.
    pub fn on_navigation_start(&mut self, url: &str) {
        if url.starts_with("/?page=") || url.starts_with("/?q=") {
            self.active = true;
        }
    }

    pub fn on_navigation_settled(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingView {
    pub query: NavigationQuery,
    pub items: Vec<BookSummary>,
    pub total_count: u64,
    pub total_pages: u32,
    pub pagination: Vec<PaginationItem>,
    pub error: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListingOutcome {
    /// Send the browser back to a remembered page before fetching anything.
    Redirect(String),
    Render(ListingView),
}

/// Drives one browsing session's catalog navigation against the gateway.
pub struct CatalogController<'a, S> {
    gateway: &'a (dyn CatalogGateway + Send + Sync),
    state: NavigationState<S>,
    loading: LoadingFlag,
}

impl<'a, S: SessionStorage> CatalogController<'a, S> {
    pub fn new(gateway: &'a (dyn CatalogGateway + Send + Sync), storage: S) -> Self {
        Self {
            gateway,
            state: NavigationState::new(storage),
            loading: LoadingFlag::default(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_active()
    }

    pub fn storage(&self) -> &S {
        self.state.storage()
    }

    /// Entry point of the listing route.
    ///
    /// A bare `/` first checks for a remembered position and redirects to it;
    /// the target is consumed, so the redirected request renders normally.
    pub async fn enter_listing(&mut self, params: &ListingParams) -> ListingOutcome {
        if params.is_root_entry() {
            if let Some(target) = self.state.consume_restore_target() {
                let url = target.to_url();
                info!("Restoring last catalog position: {}", url);
                return ListingOutcome::Redirect(url);
            }
        }

        let query = params.to_query();
        self.state.record_visit(&query);
        ListingOutcome::Render(self.navigate(query).await)
    }

    /// Fetches and plans one listing page. The loading flag is cleared on
    /// every exit path.
    pub async fn navigate(&mut self, query: NavigationQuery) -> ListingView {
        self.loading.on_navigation_start(&query.to_url());

        let result = self
            .gateway
            .fetch_page(query.page, PAGE_SIZE, &query.search_term)
            .await;

        self.loading.on_navigation_settled();

        let (page, error) = match result {
            Ok(page) => (page, None),
            Err(e) => {
                error!(
                    "Failed to load catalog page {} (query {:?}): {}",
                    query.page, query.search_term, e
                );
                (PageResult::empty(), Some(GENERIC_ERROR))
            }
        };

        ListingView {
            pagination: plan(query.page, page.total_pages, DEFAULT_WINDOW),
            query,
            items: page.items,
            total_count: page.total_count,
            total_pages: page.total_pages,
            error,
        }
    }

    /// Returns the query to navigate to, or `None` when the trimmed input
    /// matches the active search.
    pub fn submit_search(&mut self, active: &NavigationQuery, input: &str) -> Option<NavigationQuery> {
        let term = input.trim();
        if term == active.search_term {
            return None;
        }

        self.state.clear();
        Some(NavigationQuery::first_page(term))
    }

    pub fn clear_search(&mut self) -> NavigationQuery {
        self.state.clear();
        NavigationQuery::default()
    }

    /// Must run before the detail page is requested.
    pub fn select_item(&mut self, current: &NavigationQuery) {
        self.state.record_item_selection(current);
    }
}

/// Detail route lookup for a `<slug>-<id>` segment.
pub async fn load_book(
    gateway: &(dyn CatalogGateway + Send + Sync),
    composite_slug: &str,
) -> Result<BookDetail, CatalogError> {
    let id = extract_book_id(composite_slug)
        .ok_or_else(|| CatalogError::MalformedRoute(composite_slug.to_string()))?;

    match gateway.fetch_by_id(id).await {
        Ok(Some(book)) => Ok(book),
        Ok(None) => {
            warn!("Book {} not found upstream", id);
            Err(CatalogError::NotFound)
        }
        Err(e) => {
            error!("Failed to load book {}: {}", id, e);
            Err(CatalogError::UpstreamUnavailable(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::gateway::GatewayError;
    use crate::services::session::{MemorySession, LAST_PAGE_KEY, LAST_QUERY_KEY};
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubGateway {
        fail: bool,
        calls: Mutex<Vec<(u32, u32, String)>>,
    }

    #[async_trait]
    impl CatalogGateway for StubGateway {
        async fn fetch_page(
            &self,
            page: u32,
            limit: u32,
            search_term: &str,
        ) -> Result<PageResult, GatewayError> {
            self.calls
                .lock()
                .unwrap()
                .push((page, limit, search_term.to_string()));
            if self.fail {
                return Err(GatewayError::Status(StatusCode::BAD_GATEWAY));
            }
            Ok(PageResult {
                items: vec![BookSummary {
                    id: format!("b{}", page),
                    title: format!("Libro {}", page),
                    author: "Anónimo".to_string(),
                    cover_url: None,
                }],
                total_count: 120,
                total_pages: 10,
            })
        }

        async fn fetch_by_id(&self, id: &str) -> Result<Option<BookDetail>, GatewayError> {
            match id {
                "64f1" => Ok(Some(BookDetail {
                    id: id.to_string(),
                    title: "El Padrino".to_string(),
                    author: "Mario Puzo".to_string(),
                    cover_url: None,
                    synopsis: None,
                    average_rating: None,
                    review_count: None,
                    download_url: None,
                    file_type: None,
                })),
                "down" => Err(GatewayError::Status(StatusCode::SERVICE_UNAVAILABLE)),
                _ => Ok(None),
            }
        }
    }

    fn params(page: Option<&str>, q: Option<&str>) -> ListingParams {
        ListingParams {
            page: page.map(str::to_string),
            q: q.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn renders_requested_page() {
        let gateway = StubGateway::default();
        let mut controller = CatalogController::new(&gateway, MemorySession::default());

        let ListingOutcome::Render(view) = controller.enter_listing(&params(Some("3"), None)).await else {
            panic!("expected a rendered listing");
        };

        assert_eq!(view.query, NavigationQuery::new(3, ""));
        assert_eq!(view.items[0].id, "b3");
        assert_eq!(view.pagination, plan(3, 10, DEFAULT_WINDOW));
        assert_eq!(view.error, None);
        assert_eq!(gateway.calls.lock().unwrap()[0], (3, PAGE_SIZE, String::new()));
        assert_eq!(controller.storage().get(LAST_PAGE_KEY).as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn root_entry_redirects_once_without_fetching() {
        let gateway = StubGateway::default();
        let session = MemorySession::with_entries([(LAST_PAGE_KEY, "3")]);
        let mut controller = CatalogController::new(&gateway, session);

        let outcome = controller.enter_listing(&params(None, None)).await;
        assert_eq!(outcome, ListingOutcome::Redirect("/?page=3".to_string()));
        assert!(gateway.calls.lock().unwrap().is_empty());

        let outcome = controller.enter_listing(&params(None, None)).await;
        assert!(matches!(outcome, ListingOutcome::Render(_)));
    }

    #[tokio::test]
    async fn restore_redirect_keeps_search_term() {
        let gateway = StubGateway::default();
        let session = MemorySession::with_entries([(LAST_PAGE_KEY, "2"), (LAST_QUERY_KEY, "el túnel")]);
        let mut controller = CatalogController::new(&gateway, session);

        let outcome = controller.enter_listing(&params(None, None)).await;
        assert_eq!(
            outcome,
            ListingOutcome::Redirect("/?q=el%20t%C3%BAnel&page=2".to_string())
        );
    }

    #[tokio::test]
    async fn explicit_parameters_skip_restore() {
        let gateway = StubGateway::default();
        let session = MemorySession::with_entries([(LAST_PAGE_KEY, "7")]);
        let mut controller = CatalogController::new(&gateway, session);

        let outcome = controller.enter_listing(&params(Some("1"), None)).await;
        assert!(matches!(outcome, ListingOutcome::Render(_)));
        assert_eq!(controller.storage().get(LAST_PAGE_KEY), None);
    }

    #[tokio::test]
    async fn upstream_failure_renders_error_and_settles() {
        let gateway = StubGateway {
            fail: true,
            ..Default::default()
        };
        let mut controller = CatalogController::new(&gateway, MemorySession::default());

        let view = controller.navigate(NavigationQuery::new(2, "dune")).await;

        assert!(view.items.is_empty());
        assert_eq!(view.error, Some(GENERIC_ERROR));
        assert!(view.pagination.is_empty());
        assert!(!controller.is_loading());
    }

    #[test]
    fn loading_flag_hooks_are_idempotent() {
        let mut flag = LoadingFlag::default();
        flag.on_navigation_start("/seeBook/x-1");
        assert!(!flag.is_active());

        flag.on_navigation_start("/?page=2");
        flag.on_navigation_start("/?q=dune&page=1");
        assert!(flag.is_active());

        flag.on_navigation_settled();
        flag.on_navigation_settled();
        assert!(!flag.is_active());
    }

    #[test]
    fn search_submission() {
        let gateway = StubGateway::default();
        let session = MemorySession::with_entries([(LAST_PAGE_KEY, "4"), (LAST_QUERY_KEY, "dune")]);
        let mut controller = CatalogController::new(&gateway, session);
        let active = NavigationQuery::new(4, "dune");

        assert_eq!(controller.submit_search(&active, "  dune "), None);
        assert_eq!(controller.storage().get(LAST_PAGE_KEY).as_deref(), Some("4"));

        assert_eq!(
            controller.submit_search(&active, " borges "),
            Some(NavigationQuery::first_page("borges"))
        );
        assert_eq!(controller.storage().get(LAST_PAGE_KEY), None);
        assert_eq!(controller.storage().get(LAST_QUERY_KEY), None);

        assert_eq!(controller.submit_search(&active, "   "), Some(NavigationQuery::default()));
    }

    #[test]
    fn clear_search_resets_session() {
        let gateway = StubGateway::default();
        let session = MemorySession::with_entries([(LAST_PAGE_KEY, "4"), (LAST_QUERY_KEY, "dune")]);
        let mut controller = CatalogController::new(&gateway, session);

        assert_eq!(controller.clear_search(), NavigationQuery::default());
        assert_eq!(controller.storage().get(LAST_PAGE_KEY), None);
        assert_eq!(controller.storage().get(LAST_QUERY_KEY), None);
    }

    #[test]
    fn selection_pins_page_one() {
        let gateway = StubGateway::default();
        let mut controller = CatalogController::new(&gateway, MemorySession::default());

        controller.select_item(&NavigationQuery::new(1, "dune"));
        assert_eq!(controller.storage().get(LAST_PAGE_KEY).as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn resolves_detail_routes() {
        let gateway = StubGateway::default();

        let book = load_book(&gateway, "el-padrino-mario-puzo-64f1").await.unwrap();
        assert_eq!(book.id, "64f1");

        assert!(matches!(
            load_book(&gateway, "otro-libro-99").await,
            Err(CatalogError::NotFound)
        ));
        assert!(matches!(
            load_book(&gateway, "el-padrino-").await,
            Err(CatalogError::MalformedRoute(_))
        ));
        assert!(matches!(
            load_book(&gateway, "caido-down").await,
            Err(CatalogError::UpstreamUnavailable(_))
        ));
    }
}
