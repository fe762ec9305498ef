use crate::models::navigation::NavigationQuery;
use std::collections::HashMap;
use tracing::debug;

pub const LAST_PAGE_KEY: &str = "last_catalog_page";
pub const LAST_QUERY_KEY: &str = "last_catalog_query";

/// Browsing-session scoped key/value memory.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// In-process [`SessionStorage`], used wherever no browser is involved.
#[derive(Debug, Default, Clone)]
pub struct MemorySession {
    entries: HashMap<String, String>,
}

impl MemorySession {
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl SessionStorage for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Remembers where the user was in the catalog so that coming back to `/`
/// lands on the same page and search.
#[derive(Debug)]
pub struct NavigationState<S> {
    storage: S,
}

impl<S: SessionStorage> NavigationState<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Called for every rendered listing. A plain page 1 forgets the stored
    /// page; the stored query always mirrors the active search.
    pub fn record_visit(&mut self, query: &NavigationQuery) {
        if query.page > 1 {
            self.storage.set(LAST_PAGE_KEY, query.page.to_string());
        } else if !query.has_search() {
            self.storage.remove(LAST_PAGE_KEY);
        }

        if query.has_search() {
            self.storage.set(LAST_QUERY_KEY, query.search_term.clone());
        } else {
            self.storage.remove(LAST_QUERY_KEY);
        }
    }

    /// One-shot: a stored page above 1 is handed out once and then forgotten,
    /// so the redirect it drives can never repeat.
    pub fn consume_restore_target(&mut self) -> Option<NavigationQuery> {
        let page = self
            .storage
            .get(LAST_PAGE_KEY)
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|page| *page > 1)?;

        self.storage.remove(LAST_PAGE_KEY);
        let search_term = self.storage.get(LAST_QUERY_KEY).unwrap_or_default();
        debug!("Restoring catalog page {} (query {:?})", page, search_term);

        Some(NavigationQuery::new(page, search_term))
    }

    /// Pins the page a book was opened from, page 1 included.
    pub fn record_item_selection(&mut self, current: &NavigationQuery) {
        self.storage.set(LAST_PAGE_KEY, current.page.to_string());
    }

    pub fn clear(&mut self) {
        self.storage.remove(LAST_PAGE_KEY);
        self.storage.remove(LAST_QUERY_KEY);
    }
}
