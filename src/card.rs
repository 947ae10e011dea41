//! Presentation model.
//!
//! Cards are plain data derived from API items: exactly what to show, with
//! every fallback (placeholder image, list-vs-paragraph body, category links)
//! already applied.  The renderer in [`crate::ui`] only lays them out.

use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::navigator::{display_date, share_url};
use crate::origin::HostContext;
use crate::source::{Article, ArticleKind, HistoricalEvent, Image, Reference};

/// Shown whenever an item has no usable image.
pub const PLACEHOLDER_IMAGE: &str =
    "https://upload.wikimedia.org/wikipedia/commons/6/63/Wikipedia-logo.png";

const CATEGORY_BASE: &str = "https://en.wikipedia.org/wiki/Category:";

/// Characters escaped in a wiki page name.
const WIKI_PAGE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b']')
    .add(b'{')
    .add(b'}')
    .add(b'|');

/// Image reference with the placeholder already substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub url: String,
    /// `None` for the placeholder, which has no intrinsic size.
    pub size: Option<(u32, u32)>,
}

impl ImageRef {
    pub fn from_image(image: Option<&Image>) -> Self {
        match image {
            Some(img) => ImageRef {
                url: img.url.clone(),
                size: (img.width > 0 && img.height > 0).then_some((img.width, img.height)),
            },
            None => ImageRef::placeholder(),
        }
    }

    pub fn placeholder() -> Self {
        ImageRef {
            url: PLACEHOLDER_IMAGE.to_string(),
            size: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.url == PLACEHOLDER_IMAGE
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Paragraph(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// Wikipedia category page for `name`.  Accepts `Bar` or `Category:Bar`.
pub fn category_url(name: &str) -> String {
    let name = name.trim();
    let name = name.strip_prefix("Category:").unwrap_or(name);
    let page = name.replace(' ', "_");
    format!("{CATEGORY_BASE}{}", utf8_percent_encode(&page, WIKI_PAGE))
}

fn category_label(name: &str) -> String {
    let name = name.trim();
    name.strip_prefix("Category:").unwrap_or(name).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleCard {
    pub heading: String,
    pub image: ImageRef,
    pub body: Body,
    pub source: Link,
    pub categories: Vec<Link>,
}

impl ArticleCard {
    pub fn new(article: &Article) -> Self {
        let disambiguation = article.kind == ArticleKind::Disambiguation;

        let heading = if disambiguation {
            format!("{} ({})", article.title, ArticleKind::DISAMBIGUATION)
        } else {
            article.title.clone()
        };

        let body = if disambiguation {
            Body::List(
                article
                    .summary
                    .split('\n')
                    .filter(|line| !line.trim().is_empty())
                    .map(str::to_string)
                    .collect(),
            )
        } else {
            Body::Paragraph(article.summary.clone())
        };

        let source_label = if article.metadata.description.is_empty() {
            article.title.clone()
        } else {
            format!("{} - {}", article.title, article.metadata.description)
        };

        Self {
            heading,
            image: ImageRef::from_image(article.image()),
            body,
            source: Link {
                label: source_label,
                url: article.metadata.url.clone(),
            },
            categories: article
                .categories
                .iter()
                .filter(|c| !c.trim().is_empty())
                .map(|c| Link {
                    label: category_label(c),
                    url: category_url(c),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCard {
    pub heading: String,
    /// "1969 · July 20"; the year shown is always the event's own.
    pub when: String,
    pub image: ImageRef,
    pub extract: String,
    pub source: Link,
    pub references: Vec<Link>,
    /// `None` when the event cannot be addressed on its own.
    pub share_url: Option<String>,
}

impl EventCard {
    pub fn new(event: &HistoricalEvent, host: &HostContext, today: NaiveDate) -> Self {
        let when = match display_date(event, today) {
            Some(day) if event.year != 0 => format!("{} · {day}", event.year),
            Some(day) => day,
            None if event.year != 0 => event.year.to_string(),
            None => String::new(),
        };

        let label = if event.short_title.is_empty() {
            event.title.clone()
        } else {
            event.short_title.clone()
        };
        let source_label = if event.description.is_empty() {
            label
        } else {
            format!("{label} - {}", event.description)
        };

        Self {
            heading: event.title.clone(),
            when,
            image: ImageRef::from_image(event.image()),
            extract: event.extract.clone(),
            source: Link {
                label: source_label,
                url: event.url.clone(),
            },
            references: event.references.iter().map(reference_link).collect(),
            share_url: share_url(host, event, today),
        }
    }
}

fn reference_link(reference: &Reference) -> Link {
    Link {
        label: if reference.title.is_empty() {
            reference.url.clone()
        } else {
            reference.title.clone()
        },
        url: reference.url.clone(),
    }
}
