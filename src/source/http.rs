//! HTTP data source backed by the trivia API.
//!
//! Resolves the API origin from the host context on every fetch (unless an
//! explicit origin was configured), issues one blocking `GET`, and decodes
//! the JSON envelope that matches the endpoint.

use log::{debug, info};

use super::{DataSource, Endpoint, EventsResponse, FetchRequest, Payload, TriviaResponse};
use crate::error::FetchError;
use crate::origin::{self, HostContext, Origin};

pub struct HttpSource {
    host: HostContext,
    /// Fixed origin that bypasses host-based resolution.
    api_origin: Option<Origin>,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(host: HostContext) -> Self {
        Self {
            host,
            api_origin: None,
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn with_api_origin(mut self, origin: Option<Origin>) -> Self {
        self.api_origin = origin;
        self
    }

    /// Origin for the next request.  Recomputed on every call.
    pub fn origin(&self) -> Origin {
        match &self.api_origin {
            Some(origin) => origin.clone(),
            None => origin::resolve(&self.host),
        }
    }

    pub fn url_for(&self, request: &FetchRequest) -> String {
        self.origin().join(&request.path())
    }

    /// Decode a response body for `endpoint`.
    ///
    /// Pure (no I/O) so tests can exercise decoding without a server.
    pub fn parse_payload(endpoint: Endpoint, body: &[u8]) -> Result<Payload, FetchError> {
        let payload = match endpoint {
            Endpoint::RandomTrivia => {
                Payload::Trivia(serde_json::from_slice::<TriviaResponse>(body)?.results)
            }
            Endpoint::Events => {
                Payload::Events(serde_json::from_slice::<EventsResponse>(body)?.titles)
            }
        };
        Ok(payload)
    }
}

impl DataSource for HttpSource {
    fn name(&self) -> &str {
        "api"
    }

    fn fetch(&self, request: &FetchRequest) -> Result<Payload, FetchError> {
        let url = self.url_for(request);
        info!("GET {url}");

        let response = self.client.get(&url).send()?.error_for_status()?;
        let body = response.bytes()?;
        let payload = Self::parse_payload(request.endpoint, body.as_ref())?;

        debug!("GET {url} returned {} items", payload.len());
        Ok(payload)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn source_for(server: &MockServer) -> HttpSource {
        HttpSource::new(HostContext::parse("http://localhost:3000").unwrap())
            .with_api_origin(Some(Origin::new(server.base_url())))
    }

    #[test]
    fn origin_is_resolved_from_host_without_override() {
        let src = HttpSource::new(HostContext::parse("https://www.example.com").unwrap());
        assert_eq!(
            src.url_for(&FetchRequest::new(Endpoint::RandomTrivia)),
            "https://api.example.com/trivia/random"
        );
    }

    #[test]
    fn fetches_random_trivia() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/trivia/random");
            then.status(200).json_body(json!({
                "results": [{"title": "Foo", "summary": "s", "type": "standard"}]
            }));
        });

        let payload = source_for(&server)
            .fetch(&FetchRequest::new(Endpoint::RandomTrivia))
            .unwrap();

        mock.assert();
        match payload {
            Payload::Trivia(items) => assert_eq!(items[0].title, "Foo"),
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn parameterized_request_hits_escaped_path() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET);
            then.status(200).json_body(json!({ "titles": [] }));
        });

        let src = source_for(&server);
        let request = FetchRequest::with_params(Endpoint::Events, ["07-20", "Apollo 11"]);
        assert_eq!(
            src.url_for(&request),
            server.url("/on-this-day/events/07-20/Apollo%2011")
        );

        let payload = src.fetch(&request).unwrap();
        mock.assert();
        assert!(payload.is_empty());
    }

    #[test]
    fn non_success_status_is_a_status_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/on-this-day/events");
            then.status(500).body("boom");
        });

        let err = source_for(&server)
            .fetch(&FetchRequest::new(Endpoint::Events))
            .unwrap_err();
        assert_eq!(err, FetchError::Status(500));
    }

    #[test]
    fn malformed_body_is_a_parse_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/trivia/random");
            then.status(200).body("<html>not json</html>");
        });

        let err = source_for(&server)
            .fetch(&FetchRequest::new(Endpoint::RandomTrivia))
            .unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn unreachable_server_is_a_network_error() {
        let src = HttpSource::new(HostContext::parse("http://localhost:3000").unwrap())
            .with_api_origin(Some(Origin::new("http://127.0.0.1:1")));
        let err = src.fetch(&FetchRequest::new(Endpoint::Events)).unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }

    #[test]
    fn parse_payload_picks_envelope_by_endpoint() {
        let body = br#"{"titles": [{"title": "t", "year": 1066}]}"#;
        let payload = HttpSource::parse_payload(Endpoint::Events, body).unwrap();
        assert_eq!(payload.len(), 1);

        let trivia = HttpSource::parse_payload(Endpoint::RandomTrivia, body).unwrap();
        assert!(trivia.is_empty(), "unknown envelope fields are ignored");
    }
}
