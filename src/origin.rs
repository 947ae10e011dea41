//! Endpoint resolution.
//!
//! The viewer behaves as if it were served from a page URL (the
//! [`HostContext`]).  The API origin is derived from that host on every call:
//!
//! * `localhost` talks to a local backend on port 4000 over plain HTTP.
//! * Anything else talks to `api.<registrable domain>` over HTTPS, so a page
//!   served from `www.example.co.uk` uses `https://api.example.co.uk`.
//!
//! There is deliberately no cached origin; callers re-run [`resolve`] each
//! time they build a request.

use std::fmt;
use std::net::IpAddr;

use anyhow::{Context, Result};
use url::Url;

/// Hostname treated as the local development host.
pub const LOCAL_HOST: &str = "localhost";

/// Port the local development backend listens on.
pub const LOCAL_API_PORT: u16 = 4000;

/// The page URL the viewer is notionally running under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostContext {
    url: Url,
}

impl HostContext {
    /// Parse a page URL such as `https://www.example.com`.
    pub fn parse(page_url: &str) -> Result<Self> {
        let url = Url::parse(page_url).with_context(|| format!("invalid page URL `{page_url}`"))?;
        if url.host_str().is_none() {
            anyhow::bail!("page URL `{page_url}` has no host");
        }
        Ok(Self { url })
    }

    /// Hostname without port.
    pub fn hostname(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    /// `scheme://host[:port]` of the page itself, no trailing slash.
    pub fn page_origin(&self) -> Origin {
        Origin(self.url.origin().ascii_serialization())
    }
}

/// Base URL of the API: `scheme://host[:port]` with no trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin(String);

impl Origin {
    /// Accept an explicitly configured origin, stripping any trailing slash.
    pub fn new(origin: impl Into<String>) -> Self {
        let mut origin = origin.into();
        while origin.ends_with('/') {
            origin.pop();
        }
        Self(origin)
    }

    /// Absolute URL for `path` (which must start with `/`).
    pub fn join(&self, path: &str) -> String {
        format!("{}{path}", self.as_str())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the API origin from the host context.
pub fn resolve(host: &HostContext) -> Origin {
    let hostname = host.hostname();
    if hostname == LOCAL_HOST {
        return Origin(format!("http://{hostname}:{LOCAL_API_PORT}"));
    }
    Origin(format!("https://api.{}", registrable_domain(hostname)))
}

/// eTLD+1 of `hostname`, or the bare host when it has none.
fn registrable_domain(hostname: &str) -> &str {
    let hostname = hostname.trim_end_matches('.');
    if hostname.trim_matches(['[', ']']).parse::<IpAddr>().is_ok() {
        return hostname;
    }
    psl::domain_str(hostname).unwrap_or(hostname)
}
