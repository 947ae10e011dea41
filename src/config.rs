//! Command-line and environment configuration.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;

use crate::navigator::EdgePolicy;
use crate::origin::{HostContext, Origin};
use crate::route::Route;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Route to open first: `/`, `/on-this-day/events` or a deep link such
    /// as `/on-this-day/events/07-20/Apollo_11`.
    #[arg(default_value = "/")]
    pub route: String,

    /// Page URL the viewer acts as if it were served from.  The API origin
    /// is derived from its host.
    #[arg(long, env = "KNOWLEDGE_LEAF_PAGE_URL", default_value = "http://localhost:3000")]
    pub page_url: String,

    /// Talk to this API origin instead of deriving one from the page host.
    #[arg(long, env = "KNOWLEDGE_LEAF_API_ORIGIN")]
    pub api_origin: Option<String>,

    /// Wrap around at either end of a collection instead of stopping.
    #[arg(long)]
    pub wrap: bool,

    /// Where log output goes.  The terminal is taken by the UI.
    #[arg(long, env = "KNOWLEDGE_LEAF_LOG", default_value = "knowledge-leaf.log")]
    pub log_file: PathBuf,
}

impl Config {
    pub fn host(&self) -> Result<HostContext> {
        HostContext::parse(&self.page_url)
    }

    pub fn api_origin(&self) -> Option<Origin> {
        self.api_origin.as_deref().map(Origin::new)
    }

    pub fn start_route(&self) -> Result<Route> {
        Route::parse(&self.route).ok_or_else(|| anyhow!("unknown route `{}`", self.route))
    }

    pub fn edge_policy(&self) -> EdgePolicy {
        if self.wrap {
            EdgePolicy::Wrap
        } else {
            EdgePolicy::Bounded
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("knowledge-leaf").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let cfg = parse(&[]);
        assert_eq!(cfg.start_route().unwrap(), Route::Random);
        assert_eq!(cfg.edge_policy(), EdgePolicy::Bounded);
        assert_eq!(cfg.host().unwrap().hostname(), "localhost");
    }

    #[test]
    fn deep_link_route_and_wrap() {
        let cfg = parse(&["--wrap", "/on-this-day/events/07-20/Apollo_11"]);
        assert_eq!(cfg.edge_policy(), EdgePolicy::Wrap);
        assert!(matches!(cfg.start_route().unwrap(), Route::Event { .. }));
    }

    #[test]
    fn api_origin_override() {
        let cfg = parse(&["--api-origin", "http://127.0.0.1:4000/"]);
        assert_eq!(cfg.api_origin().unwrap().as_str(), "http://127.0.0.1:4000");
    }

    #[test]
    fn unknown_route_is_an_error() {
        assert!(parse(&["/nope"]).start_route().is_err());
    }
}
