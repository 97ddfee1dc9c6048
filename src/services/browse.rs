use serde::Serialize;

use crate::{
    catalog::Catalog,
    models::{Content, SearchFilters},
};

use super::title_search::search_titles;

/// Browse-page state: the last search and the title currently on screen
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrowseState {
    pub search_query: String,
    pub search_filters: SearchFilters,
    pub search_results: Vec<Content>,
    pub currently_watching: Option<Content>,
}

impl BrowseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a search and remembers its query, filters and results
    pub fn search(&mut self, catalog: &Catalog, query: &str, filters: SearchFilters) -> &[Content] {
        self.search_results = search_titles(catalog, query, &filters);
        self.search_query = query.to_string();
        self.search_filters = filters;
        &self.search_results
    }

    /// Replaces the filters, re-running the search only when a query is active
    pub fn set_filters(&mut self, catalog: &Catalog, filters: SearchFilters) {
        if self.search_query.is_empty() {
            self.search_filters = filters;
        } else {
            let query = std::mem::take(&mut self.search_query);
            self.search(catalog, &query, filters);
        }
    }

    pub fn clear(&mut self) {
        self.search_results.clear();
        self.search_query.clear();
        self.search_filters = SearchFilters::default();
    }

    pub fn set_currently_watching(&mut self, content: Option<Content>) {
        self.currently_watching = content;
    }
}
