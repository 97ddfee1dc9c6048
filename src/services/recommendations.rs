use crate::{catalog::Catalog, models::Content};

/// Maximum number of titles in a recommendation or continue-watching row
pub const RAIL_LIMIT: usize = 10;

/// Titles sharing at least one genre with the given one.
///
/// Catalog order, the source title excluded, at most [`RAIL_LIMIT`] items.
/// An unknown id yields an empty list.
pub fn get_recommendations(catalog: &Catalog, content_id: &str) -> Vec<Content> {
    let Some(source) = catalog.get(content_id) else {
        tracing::debug!(content_id, "No recommendations for unknown content");
        return Vec::new();
    };

    catalog
        .all()
        .iter()
        .filter(|c| c.id != source.id && c.shares_genre_with(source))
        .take(RAIL_LIMIT)
        .cloned()
        .collect()
}
