use crate::{
    catalog::Catalog,
    models::{Content, SearchFilters},
};

/// Case-insensitive free-text match against title, description and genre tags.
///
/// An empty query matches every item.
pub fn matches_query(content: &Content, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    content.title.to_lowercase().contains(&needle)
        || content.description.to_lowercase().contains(&needle)
        || content.genre.iter().any(|g| g.to_lowercase().contains(&needle))
}

/// Filters the catalog by free text plus structured filters.
///
/// Results keep catalog order; there is no ranking.
pub fn search_titles(catalog: &Catalog, query: &str, filters: &SearchFilters) -> Vec<Content> {
    let results: Vec<Content> = catalog
        .all()
        .iter()
        .filter(|content| matches_query(content, query) && filters.matches(content))
        .cloned()
        .collect();

    tracing::debug!(
        query,
        filtered = !filters.is_empty(),
        result_count = results.len(),
        "Catalog search completed"
    );

    results
}
