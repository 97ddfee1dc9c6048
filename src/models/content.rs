use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Kind of title in the catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
    Series,
}

impl Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentType::Movie => write!(f, "movie"),
            ContentType::Series => write!(f, "series"),
        }
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "movie" => Ok(ContentType::Movie),
            "series" => Ok(ContentType::Series),
            other => Err(format!("unknown content type: {other}")),
        }
    }
}

/// A movie or series available for browsing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub backdrop: String,
    pub year: i32,
    /// Content rating label such as `PG-13` or `TV-MA`
    pub rating: String,
    /// Display duration ("2h 28m", "4 Seasons")
    pub duration: String,
    pub genre: Vec<String>,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_new: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_trending: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cast: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Fractional progress, only set on items projected through continue-watching
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch_progress: Option<f64>,
}

impl Content {
    /// Creates a title with only the required metadata filled in
    pub fn new(id: impl Into<String>, title: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            thumbnail: String::new(),
            backdrop: String::new(),
            year: 0,
            rating: String::new(),
            duration: String::new(),
            genre: Vec::new(),
            content_type,
            featured: false,
            is_new: false,
            is_trending: false,
            video_url: None,
            trailer_url: None,
            cast: Vec::new(),
            director: None,
            imdb_rating: None,
            language: None,
            watch_progress: None,
        }
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genre = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_release(mut self, year: i32, rating: impl Into<String>) -> Self {
        self.year = year;
        self.rating = rating.into();
        self
    }

    /// True when the two titles have at least one genre tag in common
    pub fn shares_genre_with(&self, other: &Content) -> bool {
        self.genre.iter().any(|g| other.genre.contains(g))
    }
}

/// A titled row of content on the browse page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CarouselSection {
    pub id: String,
    pub title: String,
    pub content: Vec<Content>,
}
