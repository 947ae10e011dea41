//! Request sessions.
//!
//! A [`Session`] belongs to exactly one view instance and performs exactly
//! one fetch for it.  The fetch runs on a worker thread so the event loop
//! stays responsive; the result comes back over an [`mpsc`] channel that
//! the main loop drains with [`Session::poll`] on every tick.
//!
//! ```text
//!  Idle ──start()──► Loading ──ok──► Loaded(payload)
//!                        │
//!                        └──err──► Failed(error)
//! ```
//!
//! Once a session is torn down (explicitly or by dropping it) any result
//! that is still in flight is discarded; the worker notices the closed
//! channel and exits quietly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use log::{debug, info, warn};

use crate::error::FetchError;
use crate::source::{DataSource, FetchRequest, Payload};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// What the view should currently show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading,
    Loaded(Payload),
    Failed(FetchError),
}

/// Coarse lifecycle derived from [`ViewState`], used to guard `start()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Idle,
    Loading,
    Done,
}

impl ViewState {
    pub fn lifecycle(&self) -> Lifecycle {
        match self {
            ViewState::Idle => Lifecycle::Idle,
            ViewState::Loading => Lifecycle::Loading,
            ViewState::Loaded(_) | ViewState::Failed(_) => Lifecycle::Done,
        }
    }
}

/// Message sent from a fetch worker back to its session.
#[derive(Debug)]
pub struct Outcome {
    session: u64,
    result: Result<Payload, FetchError>,
}

pub struct Session {
    id: u64,
    request: FetchRequest,
    state: ViewState,
    rx: Option<mpsc::Receiver<Outcome>>,
    torn_down: bool,
}

impl Session {
    pub fn new(request: FetchRequest) -> Self {
        Self {
            id: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
            request,
            state: ViewState::Idle,
            rx: None,
            torn_down: false,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Issue the fetch.  Only the first call on a live session does any
    /// work; every later call returns `false` without touching the network.
    pub fn start(&mut self, source: Arc<dyn DataSource>) -> bool {
        if self.is_torn_down() || self.state.lifecycle() != Lifecycle::Idle {
            debug!("session {} already started, ignoring start()", self.id);
            return false;
        }

        let (tx, rx) = mpsc::channel();
        self.rx = Some(rx);
        self.state = ViewState::Loading;

        let id = self.id;
        let request = self.request.clone();
        info!("session {id}: fetching {} via {}", request.path(), source.name());

        thread::spawn(move || {
            let result = source.fetch(&request);
            // The session has been torn down if the receiver is gone.
            if tx.send(Outcome { session: id, result }).is_err() {
                debug!("session {id}: torn down before its fetch completed");
            }
        });

        true
    }

    /// Drain a pending result, if any.  Returns `true` when the state changed.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = &self.rx else {
            return false;
        };
        match rx.try_recv() {
            Ok(outcome) => self.apply(outcome),
            Err(mpsc::TryRecvError::Empty) => false,
            Err(mpsc::TryRecvError::Disconnected) => {
                let id = self.id;
                self.apply(Outcome {
                    session: id,
                    result: Err(FetchError::Network("fetch worker exited without a result".into())),
                })
            }
        }
    }

    /// Apply a worker result.  Ignored unless the session is live, still
    /// loading, and the result is its own.
    pub fn apply(&mut self, outcome: Outcome) -> bool {
        if self.is_torn_down() {
            warn!("session {}: discarding stale response", self.id);
            return false;
        }
        if outcome.session != self.id || self.state.lifecycle() != Lifecycle::Loading {
            debug!(
                "session {}: ignoring result for session {}",
                self.id, outcome.session
            );
            return false;
        }

        self.rx = None;
        self.state = match outcome.result {
            Ok(payload) if payload.is_empty() => {
                info!("session {}: loaded an empty collection", self.id);
                ViewState::Loaded(payload)
            }
            Ok(payload) => {
                info!("session {}: loaded {} items", self.id, payload.len());
                ViewState::Loaded(payload)
            }
            Err(err) => {
                warn!("session {}: {} failed: {err}", self.id, self.request.path());
                ViewState::Failed(err)
            }
        };
        true
    }

    /// Detach from any in-flight fetch.  Idempotent.
    pub fn teardown(&mut self) {
        if !self.torn_down {
            debug!("session {}: teardown", self.id);
        }
        self.torn_down = true;
        self.rx = None;
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.teardown();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
