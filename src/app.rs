use std::sync::Arc;

use chrono::{Local, NaiveDate};
use log::info;

use crate::navigator::{share_url, EdgePolicy};
use crate::origin::HostContext;
use crate::route::Route;
use crate::session::ViewState;
use crate::source::DataSource;
use crate::view::View;

pub struct App {
    /// Page host the viewer acts under.
    pub host: HostContext,
    source: Arc<dyn DataSource>,
    policy: EdgePolicy,
    /// The mounted view.  Replaced, never mutated, when the route changes.
    pub view: Option<View>,
    /// Random items viewed in this run ("today's reading").
    pub reading_count: u32,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// Last status message.
    pub status: String,
}

impl App {
    pub fn new(host: HostContext, source: Arc<dyn DataSource>, policy: EdgePolicy) -> Self {
        Self {
            host,
            source,
            policy,
            view: None,
            reading_count: 0,
            quit: false,
            status: "Starting…".into(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    // -- view lifecycle ------------------------------------------------------

    /// Discard the current view and mount a fresh one for `route`.
    pub fn open(&mut self, route: Route) {
        if let Some(mut old) = self.view.take() {
            old.unmount();
        }
        self.status = format!("Loading {}…", route.label());
        let view = View::mount(route, self.source.clone(), self.policy);
        info!("opened {} in session {}", view.route(), view.session().id());
        self.view = Some(view);
    }

    /// Show a fresh random item.  Only this counts toward today's reading;
    /// retrying a failed fetch does not.
    pub fn another_random(&mut self) {
        self.reading_count += 1;
        self.open(Route::Random);
    }

    pub fn show_events(&mut self) {
        self.open(Route::Events);
    }

    /// Re-mount the current route if its fetch failed.
    pub fn retry(&mut self) {
        let route = match &self.view {
            Some(view) if matches!(view.state(), ViewState::Failed(_)) => view.route().clone(),
            _ => return,
        };
        self.open(route);
    }

    /// Pick up fetch results; called once per event-loop tick.
    pub fn tick(&mut self) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        if !view.tick() {
            return;
        }
        match view.state() {
            ViewState::Loaded(payload) if payload.is_empty() => {
                self.status = "Nothing here today".into();
            }
            ViewState::Loaded(payload) => self.status = format!("Loaded {} items", payload.len()),
            ViewState::Failed(err) => self.status = format!("Error: {err}  (R: retry)"),
            ViewState::Idle | ViewState::Loading => {}
        }
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        if let Some(c) = self.view.as_mut().and_then(View::collection_mut) {
            c.next();
        }
    }

    pub fn select_previous(&mut self) {
        if let Some(c) = self.view.as_mut().and_then(View::collection_mut) {
            c.previous();
        }
    }

    pub fn select_first(&mut self) {
        if let Some(c) = self.view.as_mut().and_then(View::collection_mut) {
            c.first();
        }
    }

    pub fn select_last(&mut self) {
        if let Some(c) = self.view.as_mut().and_then(View::collection_mut) {
            c.last();
        }
    }

    // -- sharing -------------------------------------------------------------

    /// Shareable URL of the event on screen, also echoed to the status bar.
    pub fn share_link(&mut self) -> Option<String> {
        let today = self.today();
        let event = self.view.as_ref()?.collection()?.current_event()?;
        let url = share_url(&self.host, event, today)?;
        info!("share link: {url}");
        self.status = format!("Link: {url}");
        Some(url)
    }
}
