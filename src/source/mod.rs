//! Data source abstraction layer.
//!
//! This module defines the [`DataSource`] trait, the [`FetchRequest`] identity
//! and the wire types the API returns.  The only production implementation is
//! [`HttpSource`]; tests substitute their own sources to observe how sessions
//! call into them.
//!
//! ## For contributors — adding an endpoint
//!
//! 1. Add a variant to [`Endpoint`] with its path.
//! 2. Add the response envelope to `item.rs` and a [`Payload`] variant.
//! 3. Teach [`HttpSource::parse_payload`] which envelope to expect.

mod http;
mod item;

pub use http::HttpSource;
pub use item::{
    Article, ArticleKind, EventsResponse, HistoricalEvent, Image, Payload, Reference,
    TriviaResponse,
};

#[cfg(test)]
pub use item::ArticleMetadata;

use crate::error::FetchError;
use crate::route::encode_segment;

/// API endpoints the viewer consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET /trivia/random` → `{ results: Article[] }`
    RandomTrivia,
    /// `GET /on-this-day/events[/{date}/{title}]` → `{ titles: HistoricalEvent[] }`
    Events,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::RandomTrivia => "/trivia/random",
            Endpoint::Events => "/on-this-day/events",
        }
    }
}

/// Identity of one logical request: endpoint plus ordered path parameters.
///
/// Two requests that compare equal are the same request; a view only needs a
/// new fetch when its request changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchRequest {
    pub endpoint: Endpoint,
    pub params: Vec<String>,
}

impl FetchRequest {
    /// The default, unparameterized request for `endpoint`.
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            params: Vec::new(),
        }
    }

    pub fn with_params<I, S>(endpoint: Endpoint, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            endpoint,
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Request path with every parameter escaped as its own segment.
    pub fn path(&self) -> String {
        let mut path = self.endpoint.path().to_string();
        for param in &self.params {
            path.push('/');
            path.push_str(&encode_segment(param));
        }
        path
    }
}

/// Trait that every data source must implement.
///
/// Sessions call [`fetch()`](DataSource::fetch) from a worker thread, so
/// implementations must be [`Send`] and [`Sync`].
pub trait DataSource: Send + Sync {
    /// Human-readable label used in log lines.
    fn name(&self) -> &str;

    /// Perform one fetch for `request`.  No retries.
    fn fetch(&self, request: &FetchRequest) -> Result<Payload, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparameterized_request_uses_default_path() {
        assert_eq!(FetchRequest::new(Endpoint::Events).path(), "/on-this-day/events");
    }

    #[test]
    fn params_are_escaped_in_order() {
        let req = FetchRequest::with_params(Endpoint::Events, ["01-01", "New Year's Day?"]);
        assert_eq!(req.path(), "/on-this-day/events/01-01/New%20Year's%20Day%3F");
    }

    #[test]
    fn identical_identity_compares_equal() {
        let a = FetchRequest::with_params(Endpoint::Events, ["07-20", "Apollo 11"]);
        let b = FetchRequest::with_params(Endpoint::Events, vec!["07-20".to_string(), "Apollo 11".to_string()]);
        let c = FetchRequest::with_params(Endpoint::Events, ["Apollo 11", "07-20"]);
        assert_eq!(a, b);
        assert_ne!(a, c, "parameter order is part of the identity");
        assert_ne!(a, FetchRequest::new(Endpoint::Events));
    }
}
