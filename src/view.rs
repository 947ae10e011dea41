//! View instances.
//!
//! A [`View`] is one mounted occurrence of a route: it owns its own
//! [`Session`] and, once that session has loaded, a [`Collection`] to page
//! through.  Views are never reused.  Showing another random item or
//! retrying a failure replaces the whole view, which tears the old session
//! down with it.

use std::sync::Arc;

use log::debug;

use crate::navigator::{EdgePolicy, Navigator};
use crate::route::Route;
use crate::session::{Session, ViewState};
use crate::source::{Article, DataSource, HistoricalEvent, Payload};

/// Navigable items of a loaded view.
#[derive(Debug, Clone)]
pub enum Collection {
    Trivia(Navigator<Article>),
    Events(Navigator<HistoricalEvent>),
}

impl Collection {
    pub fn from_payload(payload: &Payload, policy: EdgePolicy) -> Self {
        match payload {
            Payload::Trivia(items) => Collection::Trivia(Navigator::new(items.clone(), policy)),
            Payload::Events(items) => Collection::Events(Navigator::new(items.clone(), policy)),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Collection::Trivia(nav) => nav.len(),
            Collection::Events(nav) => nav.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Collection::Trivia(nav) => nav.is_empty(),
            Collection::Events(nav) => nav.is_empty(),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Collection::Trivia(nav) => nav.index(),
            Collection::Events(nav) => nav.index(),
        }
    }

    pub fn next(&mut self) {
        match self {
            Collection::Trivia(nav) => {
                nav.next();
            }
            Collection::Events(nav) => {
                nav.next();
            }
        }
    }

    pub fn previous(&mut self) {
        match self {
            Collection::Trivia(nav) => {
                nav.previous();
            }
            Collection::Events(nav) => {
                nav.previous();
            }
        }
    }

    pub fn first(&mut self) {
        match self {
            Collection::Trivia(nav) => {
                nav.first();
            }
            Collection::Events(nav) => {
                nav.first();
            }
        }
    }

    pub fn last(&mut self) {
        match self {
            Collection::Trivia(nav) => {
                nav.last();
            }
            Collection::Events(nav) => {
                nav.last();
            }
        }
    }

    pub fn current_event(&self) -> Option<&HistoricalEvent> {
        match self {
            Collection::Events(nav) => nav.current(),
            Collection::Trivia(_) => None,
        }
    }
}

pub struct View {
    route: Route,
    session: Session,
    collection: Option<Collection>,
    policy: EdgePolicy,
}

impl View {
    /// Mount a view for `route` and issue its fetch.
    pub fn mount(route: Route, source: Arc<dyn DataSource>, policy: EdgePolicy) -> Self {
        let mut session = Session::new(route.request());
        session.start(source);
        debug!("mounted view for {route} (session {})", session.id());
        Self {
            route,
            session,
            collection: None,
            policy,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn state(&self) -> &ViewState {
        self.session.state()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// `None` until the session has loaded.
    pub fn collection(&self) -> Option<&Collection> {
        self.collection.as_ref()
    }

    pub fn collection_mut(&mut self) -> Option<&mut Collection> {
        self.collection.as_mut()
    }

    /// Pick up the session result.  Returns `true` when anything changed.
    pub fn tick(&mut self) -> bool {
        if !self.session.poll() {
            return false;
        }
        if let ViewState::Loaded(payload) = self.session.state() {
            let mut collection = Collection::from_payload(payload, self.policy);
            if let (Route::Event { date, title }, Collection::Events(nav)) =
                (&self.route, &mut collection)
            {
                if !nav.focus(|e| e.is_identified_by(date, title)) {
                    debug!("deep-linked event {date}/{title} not in response");
                }
            }
            self.collection = Some(collection);
        }
        true
    }

    /// Tear the session down.  Called before the view is replaced.
    pub fn unmount(&mut self) {
        self.session.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::{Duration, Instant};

    use crate::error::FetchError;
    use crate::session::tests::StubSource;
    use crate::session::Lifecycle;

    fn settle_view(view: &mut View) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while view.state().lifecycle() == Lifecycle::Loading && Instant::now() < deadline {
            view.tick();
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn event(date: &str, title: &str) -> HistoricalEvent {
        HistoricalEvent {
            title: title.into(),
            date: date.into(),
            ..Default::default()
        }
    }

    #[test]
    fn collection_appears_only_after_load() {
        let src = StubSource::ok(Payload::Trivia(vec![Article::default(), Article::default()]));
        let mut view = View::mount(Route::Random, src, EdgePolicy::Bounded);
        assert!(view.collection().is_none());

        settle_view(&mut view);
        let collection = view.collection().unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.index(), 0);
    }

    #[test]
    fn deep_linked_event_is_focused() {
        let src = StubSource::ok(Payload::Events(vec![
            event("07-19", "Something else"),
            event("07-20", "Apollo 11 lands"),
        ]));
        let route = Route::Event {
            date: "07-20".into(),
            title: "Apollo_11_lands".into(),
        };
        let mut view = View::mount(route, src, EdgePolicy::Bounded);
        settle_view(&mut view);

        let current = view.collection().and_then(Collection::current_event).unwrap();
        assert_eq!(current.title, "Apollo 11 lands");
    }

    #[test]
    fn failed_view_has_no_collection() {
        let src = StubSource::err(FetchError::Network("down".into()));
        let mut view = View::mount(Route::Events, src, EdgePolicy::Wrap);
        settle_view(&mut view);
        assert!(matches!(view.state(), ViewState::Failed(_)));
        assert!(view.collection().is_none());
    }

    #[test]
    fn empty_payload_gives_empty_collection() {
        let src = StubSource::ok(Payload::Events(Vec::new()));
        let mut view = View::mount(Route::Events, src, EdgePolicy::Bounded);
        settle_view(&mut view);

        let collection = view.collection_mut().unwrap();
        assert!(collection.is_empty());
        collection.next();
        collection.previous();
        assert!(collection.current_event().is_none());
    }

    #[test]
    fn unmount_tears_down_session() {
        let src = StubSource::ok(Payload::Trivia(Vec::new()));
        let mut view = View::mount(Route::Random, src, EdgePolicy::Bounded);
        view.unmount();
        assert!(view.session().is_torn_down());
        assert!(!view.tick());
    }

    #[test]
    fn collection_navigation_respects_policy() {
        let items = vec![event("01-01", "a"), event("01-02", "b")];
        let mut wrap = Collection::from_payload(&Payload::Events(items.clone()), EdgePolicy::Wrap);
        wrap.next();
        wrap.next();
        assert_eq!(wrap.index(), 0);

        let mut bounded = Collection::from_payload(&Payload::Events(items), EdgePolicy::Bounded);
        bounded.next();
        bounded.next();
        assert_eq!(bounded.index(), 1);
        bounded.first();
        assert_eq!(bounded.index(), 0);
        bounded.last();
        assert_eq!(bounded.index(), 1);
    }
}
