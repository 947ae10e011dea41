//! Paging through a loaded collection, and deep links into it.
//!
//! A [`Navigator`] is only ever built from a loaded payload.  It keeps a
//! zero-based index into the items and moves it one step at a time.  What
//! happens at either end is decided by the [`EdgePolicy`], and the same
//! policy governs both directions.

use chrono::{Datelike, NaiveDate};

use crate::origin::HostContext;
use crate::route::Route;
use crate::source::HistoricalEvent;

/// Behaviour when stepping past either end of the collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgePolicy {
    /// Hold at the first / last item.
    #[default]
    Bounded,
    /// Step from the last item to the first and vice versa.
    Wrap,
}

#[derive(Debug, Clone)]
pub struct Navigator<T> {
    items: Vec<T>,
    index: usize,
    policy: EdgePolicy,
}

impl<T> Navigator<T> {
    pub fn new(items: Vec<T>, policy: EdgePolicy) -> Self {
        Self {
            items,
            index: 0,
            policy,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn at(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn current(&self) -> Option<&T> {
        self.at(self.index)
    }

    pub fn next(&mut self) -> Option<&T> {
        let len = self.items.len();
        if len == 0 {
            return None;
        }
        self.index = match self.policy {
            EdgePolicy::Bounded => (self.index + 1).min(len - 1),
            EdgePolicy::Wrap => (self.index + 1) % len,
        };
        self.current()
    }

    pub fn previous(&mut self) -> Option<&T> {
        let len = self.items.len();
        if len == 0 {
            return None;
        }
        self.index = match self.policy {
            EdgePolicy::Bounded => self.index.saturating_sub(1),
            EdgePolicy::Wrap => (self.index + len - 1) % len,
        };
        self.current()
    }

    pub fn first(&mut self) -> Option<&T> {
        self.index = 0;
        self.current()
    }

    pub fn last(&mut self) -> Option<&T> {
        self.index = self.items.len().saturating_sub(1);
        self.current()
    }

    /// Move to the first item matching `predicate`.  Leaves the index alone
    /// and returns `false` when nothing matches.
    pub fn focus(&mut self, predicate: impl Fn(&T) -> bool) -> bool {
        match self.items.iter().position(predicate) {
            Some(i) => {
                self.index = i;
                true
            }
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Deep links
// ---------------------------------------------------------------------------

/// `MM-DD` key used for events the server sent without a date.  The
/// collection is "on this day", so the day is today.
pub fn date_key(event: &HistoricalEvent, today: NaiveDate) -> String {
    if event.date.is_empty() {
        today.format("%m-%d").to_string()
    } else {
        event.date.clone()
    }
}

/// The route identifying `event` on its own, or `None` when the event has
/// no title to address it by.
pub fn event_route(event: &HistoricalEvent, today: NaiveDate) -> Option<Route> {
    let title = event.normalized_title();
    if title.is_empty() {
        return None;
    }
    Some(Route::Event {
        date: date_key(event, today),
        title,
    })
}

/// `/on-this-day/events/{date}/{title}` for `event`, escaped.
pub fn deep_link(event: &HistoricalEvent, today: NaiveDate) -> Option<String> {
    event_route(event, today).map(|route| route.path())
}

/// Absolute, shareable URL for `event` on the page host.
///
/// Uses the server-supplied `app_link_url` when present and falls back to
/// the locally built deep link otherwise.
pub fn share_url(
    host: &HostContext,
    event: &HistoricalEvent,
    today: NaiveDate,
) -> Option<String> {
    let path = if event.app_link_url.is_empty() {
        deep_link(event, today)?
    } else if event.app_link_url.starts_with('/') {
        event.app_link_url.clone()
    } else {
        format!("/{}", event.app_link_url)
    };
    Some(host.page_origin().join(&path))
}

/// Human-readable month and day of `event` ("July 20"), computed against
/// `today`'s year.  The year used for the computation is never part of the
/// output.
pub fn display_date(event: &HistoricalEvent, today: NaiveDate) -> Option<String> {
    let (month, day) = event.date.split_once('-')?;
    let month: u32 = month.trim().parse().ok()?;
    let day: u32 = day.trim().parse().ok()?;

    // 29 February needs a leap year to exist at all.
    let date = NaiveDate::from_ymd_opt(today.year(), month, day)
        .or_else(|| NaiveDate::from_ymd_opt(2000, month, day))?;
    Some(date.format("%B %-d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav(n: usize, policy: EdgePolicy) -> Navigator<usize> {
        Navigator::new((0..n).collect(), policy)
    }

    fn event(date: &str, title: &str) -> HistoricalEvent {
        HistoricalEvent {
            title: title.into(),
            date: date.into(),
            year: 1969,
            ..Default::default()
        }
    }

    // -- navigation ----------------------------------------------------------

    #[test]
    fn starts_at_first_item() {
        let n = nav(3, EdgePolicy::Bounded);
        assert_eq!(n.index(), 0);
        assert_eq!(n.current(), Some(&0));
    }

    #[test]
    fn bounded_next_holds_at_last() {
        let mut n = nav(4, EdgePolicy::Bounded);
        for _ in 0..3 {
            n.next();
        }
        assert_eq!(n.index(), 3);
        assert_eq!(n.next(), Some(&3));
        assert_eq!(n.index(), 3);
    }

    #[test]
    fn bounded_previous_holds_at_first() {
        let mut n = nav(4, EdgePolicy::Bounded);
        assert_eq!(n.previous(), Some(&0));
        assert_eq!(n.index(), 0);
    }

    #[test]
    fn wrap_next_returns_to_first() {
        let mut n = nav(4, EdgePolicy::Wrap);
        for _ in 0..3 {
            n.next();
        }
        assert_eq!(n.index(), 3);
        assert_eq!(n.next(), Some(&0));
    }

    #[test]
    fn wrap_previous_goes_to_last() {
        let mut n = nav(4, EdgePolicy::Wrap);
        assert_eq!(n.previous(), Some(&3));
        assert_eq!(n.previous(), Some(&2));
    }

    #[test]
    fn single_item_stays_put_under_both_policies() {
        for policy in [EdgePolicy::Bounded, EdgePolicy::Wrap] {
            let mut n = nav(1, policy);
            assert_eq!(n.next(), Some(&0));
            assert_eq!(n.previous(), Some(&0));
        }
    }

    #[test]
    fn empty_collection_navigation_is_noop() {
        for policy in [EdgePolicy::Bounded, EdgePolicy::Wrap] {
            let mut n = nav(0, policy);
            assert!(n.current().is_none());
            assert!(n.next().is_none());
            assert!(n.previous().is_none());
            assert!(n.last().is_none());
            assert_eq!(n.index(), 0);
        }
    }

    #[test]
    fn first_and_last_jump() {
        let mut n = nav(5, EdgePolicy::Bounded);
        assert_eq!(n.last(), Some(&4));
        assert_eq!(n.first(), Some(&0));
    }

    #[test]
    fn focus_moves_to_match_only() {
        let mut n = nav(5, EdgePolicy::Bounded);
        assert!(n.focus(|&i| i == 3));
        assert_eq!(n.index(), 3);
        assert!(!n.focus(|&i| i == 42));
        assert_eq!(n.index(), 3);
    }

    // -- deep links ----------------------------------------------------------

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn deep_link_uses_date_and_normalized_title() {
        let e = event("07-20", "Apollo 11 lands on the Moon");
        assert_eq!(
            deep_link(&e, today()).as_deref(),
            Some("/on-this-day/events/07-20/Apollo_11_lands_on_the_Moon")
        );
    }

    #[test]
    fn deep_link_escapes_segments() {
        let e = event("07-20", "AC/DC & friends?");
        let link = deep_link(&e, today()).unwrap();
        assert_eq!(link, "/on-this-day/events/07-20/AC%2FDC_%26_friends%3F");
        assert_eq!(Route::parse(&link), event_route(&e, today()));
    }

    #[test]
    fn undated_event_links_to_today() {
        let e = event("", "Apollo 11");
        let link = deep_link(&e, today()).unwrap();
        assert_eq!(link, "/on-this-day/events/10-18/Apollo_11");

        let route = Route::parse(&link).unwrap();
        assert_eq!(Some(route), event_route(&e, today()));
    }

    #[test]
    fn untitled_event_has_no_link() {
        let host = HostContext::parse("http://localhost:3000").unwrap();
        for title in ["", "   "] {
            let e = event("07-20", title);
            assert_eq!(event_route(&e, today()), None);
            assert_eq!(deep_link(&e, today()), None);
            assert_eq!(share_url(&host, &e, today()), None);
        }
    }

    #[test]
    fn share_url_prefers_server_link() {
        let host = HostContext::parse("https://www.example.com/on-this-day/events").unwrap();
        let mut e = event("07-20", "Apollo 11");
        e.app_link_url = "/on-this-day/events/07-20/Apollo_11".into();
        assert_eq!(
            share_url(&host, &e, today()).as_deref(),
            Some("https://www.example.com/on-this-day/events/07-20/Apollo_11")
        );

        // A server link stands on its own, even for an untitled event.
        e.title.clear();
        assert!(share_url(&host, &e, today()).is_some());
    }

    #[test]
    fn share_url_falls_back_to_deep_link() {
        let host = HostContext::parse("http://localhost:3000").unwrap();
        let e = event("01-01", "New Year");
        assert_eq!(
            share_url(&host, &e, today()).as_deref(),
            Some("http://localhost:3000/on-this-day/events/01-01/New_Year")
        );
    }

    // -- display date --------------------------------------------------------

    #[test]
    fn display_date_is_month_and_day_only() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let shown = display_date(&event("07-20", "x"), today).unwrap();
        assert_eq!(shown, "July 20");
        assert!(!shown.contains("2026"));
        assert!(!shown.contains("1969"));
    }

    #[test]
    fn display_date_handles_leap_day_in_common_year() {
        let today = NaiveDate::from_ymd_opt(2027, 3, 1).unwrap();
        assert_eq!(display_date(&event("02-29", "x"), today).as_deref(), Some("February 29"));
    }

    #[test]
    fn display_date_rejects_garbage() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert!(display_date(&event("", "x"), today).is_none());
        assert!(display_date(&event("13-01", "x"), today).is_none());
        assert!(display_date(&event("July 20", "x"), today).is_none());
    }
}
