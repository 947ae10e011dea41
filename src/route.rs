//! User-facing routes and their mapping onto API requests.
//!
//! | Route path                          | Fetches                               |
//! |-------------------------------------|---------------------------------------|
//! | `/`                                 | `/trivia/random`                      |
//! | `/on-this-day/events`               | `/on-this-day/events`                 |
//! | `/on-this-day/events/{date}/{title}`| `/on-this-day/events/{date}/{title}`  |
//!
//! Path segments are escaped with the same character set browsers use for
//! `encodeURIComponent`, so a link produced here can be pasted into the web
//! front end and vice versa.

use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::source::{Endpoint, FetchRequest};

/// Characters left unescaped in a path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const RANDOM_PATH: &str = "/";
pub const EVENTS_PATH: &str = "/on-this-day/events";

/// Escape a single path segment.
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Undo [`encode_segment`].  `None` when the bytes are not UTF-8.
pub fn decode_segment(segment: &str) -> Option<String> {
    percent_decode_str(segment)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// One random trivia article.
    Random,
    /// Today's full on-this-day collection.
    Events,
    /// A single historical event, identified by date key and title.
    Event { date: String, title: String },
}

impl Route {
    /// Parse a route path.  Query strings and fragments are ignored, as is a
    /// trailing slash.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Some(Route::Random);
        }

        let segments: Vec<&str> = trimmed.trim_start_matches('/').split('/').collect();
        match segments.as_slice() {
            ["on-this-day", "events"] => Some(Route::Events),
            ["on-this-day", "events", date, title] if !date.is_empty() && !title.is_empty() => {
                Some(Route::Event {
                    date: decode_segment(date)?,
                    title: decode_segment(title)?,
                })
            }
            _ => None,
        }
    }

    /// Canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Route::Random => RANDOM_PATH.to_string(),
            Route::Events => EVENTS_PATH.to_string(),
            Route::Event { date, title } => format!(
                "{EVENTS_PATH}/{}/{}",
                encode_segment(date),
                encode_segment(title)
            ),
        }
    }

    /// The API request that backs this route.
    pub fn request(&self) -> FetchRequest {
        match self {
            Route::Random => FetchRequest::new(Endpoint::RandomTrivia),
            Route::Events => FetchRequest::new(Endpoint::Events),
            Route::Event { date, title } => {
                FetchRequest::with_params(Endpoint::Events, [date.clone(), title.clone()])
            }
        }
    }

    /// Short human label for the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            Route::Random => "Random",
            Route::Events | Route::Event { .. } => "On This Day",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
