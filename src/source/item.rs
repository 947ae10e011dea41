//! Wire types returned by the API.
//!
//! The backend is loose about shape: images may be missing or carry an empty
//! URL, and list fields may be absent or `null`.  Every such field
//! deserializes to its empty value here so the rest of the application never
//! has to shape-check a payload.

use serde::{Deserialize, Deserializer};

/// Treat both a missing field and an explicit `null` as `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An illustrative image.  An empty `url` means "no image".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

impl Image {
    pub fn is_present(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

/// Classification tag of a trivia article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ArticleKind {
    #[default]
    Standard,
    /// The summary is a newline-separated list of candidate meanings.
    Disambiguation,
    Other(String),
}

impl ArticleKind {
    pub const DISAMBIGUATION: &'static str = "disambiguation";
}

impl From<String> for ArticleKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "" | "standard" => ArticleKind::Standard,
            ArticleKind::DISAMBIGUATION => ArticleKind::Disambiguation,
            _ => ArticleKind::Other(tag),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArticleMetadata {
    #[serde(default)]
    pub description: String,
    /// Link to the full article.
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: Option<Image>,
}

/// A random trivia item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(rename = "type", default)]
    pub kind: ArticleKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ArticleMetadata,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<String>,
}

impl Article {
    /// The article image, if it has a usable URL.
    pub fn image(&self) -> Option<&Image> {
        self.metadata.image.as_ref().filter(|img| img.is_present())
    }
}

/// A citation attached to a historical event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Reference {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

/// One "on this day" event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HistoricalEvent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub short_title: String,
    #[serde(default)]
    pub description: String,
    /// Year the event happened.
    #[serde(default)]
    pub year: i32,
    /// Calendar date key, `MM-DD`.
    #[serde(default)]
    pub date: String,
    /// Title in canonical form (`Apollo_11`).  Derived from `title` when the
    /// server leaves it out.
    #[serde(default)]
    pub normalized_title: String,
    #[serde(default)]
    pub extract: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: Option<Image>,
    /// Source article URL.
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub references: Vec<Reference>,
    /// Server-supplied relative share path.
    #[serde(default)]
    pub app_link_url: String,
}

/// Canonical form of a title: trimmed, whitespace runs become `_`.
pub fn normalize_title(title: &str) -> String {
    title.split_whitespace().collect::<Vec<_>>().join("_")
}

impl HistoricalEvent {
    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref().filter(|img| img.is_present())
    }

    pub fn normalized_title(&self) -> String {
        if self.normalized_title.is_empty() {
            normalize_title(&self.title)
        } else {
            self.normalized_title.clone()
        }
    }

    /// Whether this is the event identified by `date` and `title`.  `title`
    /// may be given in display or canonical form.  An undated event matches
    /// any date, since its link was built from the day it was shown on.
    pub fn is_identified_by(&self, date: &str, title: &str) -> bool {
        (self.date.is_empty() || self.date == date) && self.normalized_title() == normalize_title(title)
    }
}

/// `GET /trivia/random`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TriviaResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<Article>,
}

/// `GET /on-this-day/events[...]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub titles: Vec<HistoricalEvent>,
}

/// A successfully fetched collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Trivia(Vec<Article>),
    Events(Vec<HistoricalEvent>),
}

impl Payload {
    pub fn len(&self) -> usize {
        match self {
            Payload::Trivia(items) => items.len(),
            Payload::Events(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
