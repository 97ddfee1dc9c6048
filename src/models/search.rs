use serde::{Deserialize, Serialize};

use super::{Content, ContentType};

/// Structured search constraints. Every absent field matches everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    /// Matches when the item carries at least one of these tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<Vec<String>>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.genres().is_empty()
            && self.content_type.is_none()
            && self.year.is_none()
            && self.rating.is_none()
    }

    fn genres(&self) -> &[String] {
        self.genre.as_deref().unwrap_or_default()
    }

    /// Applies the structured constraints only; free text is handled by the query engine
    pub fn matches(&self, content: &Content) -> bool {
        let genres = self.genres();
        let genre_ok = genres.is_empty() || genres.iter().any(|g| content.genre.contains(g));
        let type_ok = self.content_type.map_or(true, |t| t == content.content_type);
        let year_ok = self.year.map_or(true, |y| y == content.year);
        let rating_ok = self.rating.as_ref().map_or(true, |r| *r == content.rating);

        genre_ok && type_ok && year_ok && rating_ok
    }
}
