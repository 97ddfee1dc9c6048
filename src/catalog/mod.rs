//! The static content catalog.
//!
//! The catalog is built once at startup and never mutated; every query runs
//! as a linear scan in catalog order.

mod mock_data;

use crate::models::{CarouselSection, Content};

/// Immutable collection of browsable titles
#[derive(Debug, Clone)]
pub struct Catalog {
    featured: Option<Content>,
    sections: Vec<CarouselSection>,
    items: Vec<Content>,
}

impl Catalog {
    /// Builds a catalog from a flat list of items, without sections
    pub fn new(items: Vec<Content>) -> Self {
        Self {
            featured: None,
            sections: Vec::new(),
            items,
        }
    }

    /// Builds a catalog from a featured title and browse rows.
    ///
    /// Item order is the featured title followed by each section's items.
    /// An id already seen earlier is not listed twice.
    pub fn from_sections(featured: Content, sections: Vec<CarouselSection>) -> Self {
        let mut items: Vec<Content> = Vec::new();
        for content in std::iter::once(&featured).chain(sections.iter().flat_map(|s| &s.content)) {
            if !items.iter().any(|c| c.id == content.id) {
                items.push(content.clone());
            }
        }

        Self {
            featured: Some(featured),
            sections,
            items,
        }
    }

    /// The bundled demo catalog
    pub fn mock() -> Self {
        Self::from_sections(mock_data::featured(), mock_data::sections())
    }

    pub fn all(&self) -> &[Content] {
        &self.items
    }

    pub fn featured(&self) -> Option<&Content> {
        self.featured.as_ref()
    }

    pub fn sections(&self) -> &[CarouselSection] {
        &self.sections
    }

    pub fn get(&self, content_id: &str) -> Option<&Content> {
        self.items.iter().find(|c| c.id == content_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::mock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_catalog_order() {
        let catalog = Catalog::mock();
        let ids: Vec<&str> = catalog.all().iter().map(|c| c.id.as_str()).collect();

        assert_eq!(catalog.len(), 16);
        assert_eq!(ids[0], "featured-1");
        assert_eq!(ids[1], "cw-1");
        assert_eq!(ids.last(), Some(&"tv-3"));
    }

    #[test]
    fn test_mock_sections() {
        let catalog = Catalog::mock();
        let section_ids: Vec<&str> = catalog.sections().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            section_ids,
            vec!["continue-watching", "trending", "movies", "tv-shows"]
        );
        assert!(catalog.featured().unwrap().featured);
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::mock();
        assert_eq!(catalog.get("m-1").unwrap().title, "Interstellar");
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let catalog = Catalog::mock();
        for (i, content) in catalog.all().iter().enumerate() {
            assert!(
                !catalog.all()[i + 1..].iter().any(|c| c.id == content.id),
                "duplicate id {}",
                content.id
            );
        }
    }
}
