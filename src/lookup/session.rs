use std::time::Duration;

use tokio::time::Instant;

use super::debounce::Debouncer;
use super::expand::KeyStrategy;
use super::lifecycle::{Completion, Request, RequestLifecycle, RequestToken, Resolution};
use crate::model::{LicenseRecord, Query};

/// Where a session is between keystrokes and results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing pending.
    Idle,
    /// Input changed; a query will be issued when the quiet period ends.
    AwaitingDebounce,
    /// A request is in flight and no newer input is pending.
    RequestInFlight(RequestToken),
}

/// Inputs that drive a [`SearchSession`].
#[derive(Debug)]
pub enum SessionEvent {
    /// The screen's combined input is now this query.
    InputChanged(Query),
    /// The debounce deadline may have passed.
    DebounceElapsed,
    /// A dispatched request finished.
    ResponseArrived(Completion),
}

/// What the caller must do after [`SearchSession::handle`].
#[derive(Debug)]
pub enum Effect {
    None,
    /// Run this request and feed its completion back as `ResponseArrived`.
    Dispatch(Request),
    Resolved(Resolution),
}

/// Per-screen search state: debounced input feeding the request lifecycle.
#[derive(Debug)]
pub struct SearchSession {
    debounce: Debouncer,
    lifecycle: RequestLifecycle,
    latest: Option<Query>,
}

impl SearchSession {
    pub fn new(quiet: Duration, keys: KeyStrategy) -> Self {
        Self {
            debounce: Debouncer::new(quiet),
            lifecycle: RequestLifecycle::new(keys),
            latest: None,
        }
    }

    /// Advances the state machine by one event.
    pub fn handle(&mut self, event: SessionEvent, now: Instant) -> Effect {
        match event {
            SessionEvent::InputChanged(query) => {
                self.latest = Some(query);
                self.debounce.touch(now);
                Effect::None
            }
            SessionEvent::DebounceElapsed => {
                if !self.debounce.fire(now) {
                    return Effect::None;
                }
                self.latest
                    .take()
                    .and_then(|query| self.lifecycle.issue(query))
                    .map_or(Effect::None, Effect::Dispatch)
            }
            SessionEvent::ResponseArrived(completion) => {
                Effect::Resolved(self.lifecycle.resolve(completion))
            }
        }
    }

    /// Cancels the pending trigger and the in-flight request. Called when
    /// the owning screen goes away.
    pub fn teardown(&mut self) {
        self.debounce.cancel();
        self.latest = None;
        self.lifecycle.cancel();
    }

    pub fn phase(&self) -> Phase {
        if self.debounce.is_pending() {
            Phase::AwaitingDebounce
        } else if let Some(token) = self.lifecycle.in_flight() {
            Phase::RequestInFlight(token)
        } else {
            Phase::Idle
        }
    }

    /// When the event loop should deliver [`SessionEvent::DebounceElapsed`].
    pub fn deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    pub fn is_searching(&self) -> bool {
        self.lifecycle.in_flight().is_some()
    }

    pub fn results(&self) -> &[LicenseRecord] {
        self.lifecycle.results()
    }

    pub fn toggle(&mut self, index: usize) -> bool {
        self.lifecycle.toggle(index)
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.lifecycle.is_expanded(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;
    use crate::lookup::debounce::DEFAULT_QUIET_PERIOD;
    use crate::model::SearchCriteria;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn session() -> SearchSession {
        SearchSession::new(DEFAULT_QUIET_PERIOD, KeyStrategy::Identity)
    }

    fn by_call(call: &str) -> Query {
        Query::Search(SearchCriteria::new(call, "", ""))
    }

    fn record(call: &str) -> LicenseRecord {
        LicenseRecord {
            call_sign: call.into(),
            call_count: 1,
            ..LicenseRecord::default()
        }
    }

    fn expect_dispatch(effect: Effect) -> Request {
        match effect {
            Effect::Dispatch(request) => request,
            other => panic!("expected Dispatch, got {other:?}"),
        }
    }

    fn arrive(session: &mut SearchSession, token: RequestToken, calls: &[&str], now: Instant) -> Effect {
        let records = calls.iter().map(|c| record(c)).collect();
        session.handle(
            SessionEvent::ResponseArrived(Completion {
                token,
                result: Ok(records),
            }),
            now,
        )
    }

    #[test]
    fn starts_idle() {
        let session = session();
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.deadline(), None);
        assert!(session.results().is_empty());
    }

    #[test]
    fn input_waits_for_debounce() {
        let start = Instant::now();
        let mut session = session();
        let effect = session.handle(SessionEvent::InputChanged(by_call("W1")), start);
        assert!(matches!(effect, Effect::None));
        assert_eq!(session.phase(), Phase::AwaitingDebounce);
        assert_eq!(session.deadline(), Some(start + ms(250)));
    }

    #[test]
    fn early_elapsed_event_is_ignored() {
        let start = Instant::now();
        let mut session = session();
        session.handle(SessionEvent::InputChanged(by_call("W1")), start);
        let effect = session.handle(SessionEvent::DebounceElapsed, start + ms(100));
        assert!(matches!(effect, Effect::None));
        assert_eq!(session.phase(), Phase::AwaitingDebounce);
    }

    #[test]
    fn burst_issues_one_request_with_latest_input() {
        let start = Instant::now();
        let mut session = session();
        session.handle(SessionEvent::InputChanged(by_call("W")), start);
        session.handle(SessionEvent::InputChanged(by_call("W1")), start + ms(100));
        session.handle(SessionEvent::InputChanged(by_call("W1A")), start + ms(200));

        let effect = session.handle(SessionEvent::DebounceElapsed, start + ms(300));
        assert!(matches!(effect, Effect::None), "timer restarts on each event");

        let request = expect_dispatch(session.handle(SessionEvent::DebounceElapsed, start + ms(450)));
        assert_eq!(request.query, by_call("W1A"));
        assert_eq!(session.phase(), Phase::RequestInFlight(request.token));

        let again = session.handle(SessionEvent::DebounceElapsed, start + ms(900));
        assert!(matches!(again, Effect::None), "one trigger per burst");
    }

    #[test]
    fn empty_input_issues_nothing_and_keeps_results() {
        let start = Instant::now();
        let mut session = session();
        session.handle(SessionEvent::InputChanged(by_call("W1AW")), start);
        let request = expect_dispatch(session.handle(SessionEvent::DebounceElapsed, start + ms(250)));
        arrive(&mut session, request.token, &["W1AW"], start + ms(300));

        session.handle(
            SessionEvent::InputChanged(Query::Search(SearchCriteria::default())),
            start + ms(400),
        );
        let effect = session.handle(SessionEvent::DebounceElapsed, start + ms(650));
        assert!(matches!(effect, Effect::None));
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.results().len(), 1);
    }

    #[test]
    fn out_of_order_responses_show_latest_request() {
        let start = Instant::now();
        let mut session = session();

        session.handle(SessionEvent::InputChanged(by_call("W1")), start);
        let r1 = expect_dispatch(session.handle(SessionEvent::DebounceElapsed, start + ms(250)));
        session.handle(SessionEvent::InputChanged(by_call("W1AW")), start + ms(300));
        let r2 = expect_dispatch(session.handle(SessionEvent::DebounceElapsed, start + ms(550)));
        assert!(r1.cancel.is_cancelled());

        let applied = arrive(&mut session, r2.token, &["W1AW"], start + ms(600));
        assert!(matches!(applied, Effect::Resolved(Resolution::Applied(1))));
        let stale = arrive(&mut session, r1.token, &["W1ABC", "W1XYZ"], start + ms(700));
        assert!(matches!(stale, Effect::Resolved(Resolution::Superseded)));

        assert_eq!(session.results()[0].call_sign, "W1AW");
        assert_eq!(session.results().len(), 1);
    }

    #[test]
    fn typing_during_flight_reports_awaiting_debounce() {
        let start = Instant::now();
        let mut session = session();
        session.handle(SessionEvent::InputChanged(by_call("W1")), start);
        expect_dispatch(session.handle(SessionEvent::DebounceElapsed, start + ms(250)));
        session.handle(SessionEvent::InputChanged(by_call("W1A")), start + ms(260));
        assert_eq!(session.phase(), Phase::AwaitingDebounce);
        assert!(session.is_searching());
    }

    #[test]
    fn failure_keeps_results() {
        let start = Instant::now();
        let mut session = session();
        session.handle(SessionEvent::InputChanged(by_call("W1AW")), start);
        let r1 = expect_dispatch(session.handle(SessionEvent::DebounceElapsed, start + ms(250)));
        arrive(&mut session, r1.token, &["W1AW"], start + ms(300));

        session.handle(SessionEvent::InputChanged(by_call("W1AX")), start + ms(400));
        let r2 = expect_dispatch(session.handle(SessionEvent::DebounceElapsed, start + ms(650)));
        let effect = session.handle(
            SessionEvent::ResponseArrived(Completion {
                token: r2.token,
                result: Err(ClientError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE)),
            }),
            start + ms(700),
        );
        assert!(matches!(effect, Effect::Resolved(Resolution::Failed)));
        assert_eq!(session.results()[0].call_sign, "W1AW");
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn teardown_cancels_pending_trigger() {
        let start = Instant::now();
        let mut session = session();
        session.handle(SessionEvent::InputChanged(by_call("W1AW")), start);
        session.teardown();
        assert_eq!(session.deadline(), None);
        let effect = session.handle(SessionEvent::DebounceElapsed, start + ms(1_000));
        assert!(matches!(effect, Effect::None));
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn teardown_cancels_in_flight_request() {
        let start = Instant::now();
        let mut session = session();
        session.handle(SessionEvent::InputChanged(by_call("W1AW")), start);
        let request = expect_dispatch(session.handle(SessionEvent::DebounceElapsed, start + ms(250)));
        session.teardown();
        assert!(request.cancel.is_cancelled());
        assert!(!session.is_searching());

        let late = arrive(&mut session, request.token, &["W1AW"], start + ms(400));
        assert!(matches!(late, Effect::Resolved(Resolution::Superseded)));
        assert!(session.results().is_empty());
    }

    #[test]
    fn new_results_reset_expansion() {
        let start = Instant::now();
        let mut session = session();
        session.handle(SessionEvent::InputChanged(by_call("W1")), start);
        let r1 = expect_dispatch(session.handle(SessionEvent::DebounceElapsed, start + ms(250)));
        arrive(&mut session, r1.token, &["W1AW", "W1XYZ"], start + ms(300));
        session.toggle(0);
        assert!(session.is_expanded(0));
        assert!(!session.is_expanded(1));

        session.handle(SessionEvent::InputChanged(by_call("W1A")), start + ms(400));
        let r2 = expect_dispatch(session.handle(SessionEvent::DebounceElapsed, start + ms(650)));
        arrive(&mut session, r2.token, &["W1AW"], start + ms(700));
        assert!(!session.is_expanded(0));
    }
}
