use crate::{
    catalog::Catalog,
    models::{Content, WatchHistoryItem},
};

use super::recommendations::RAIL_LIMIT;

/// Projects partially watched history entries onto catalog titles.
///
/// Keeps entries with `0 < progress < 0.9` whose id exists in the catalog,
/// in history order, annotated with `watch_progress`, at most [`RAIL_LIMIT`].
pub fn continue_watching(catalog: &Catalog, history: &[WatchHistoryItem]) -> Vec<Content> {
    history
        .iter()
        .filter(|item| item.is_in_progress())
        .filter_map(|item| {
            catalog.get(&item.content_id).map(|content| Content {
                watch_progress: Some(item.progress),
                ..content.clone()
            })
        })
        .take(RAIL_LIMIT)
        .collect()
}
