//! Request lifecycle: at most one authoritative in-flight request per session.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio_util::sync::CancellationToken;

use super::expand::{ExpandState, KeyStrategy};
use crate::client::ClientError;
use crate::model::{LicenseRecord, Query};

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Identity of one issued request. Unique for the life of the process, so
/// completions from a torn-down session never match a live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    fn next() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

#[mutants::skip]
impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An issued request, ready to hand to a dispatcher.
#[derive(Debug, Clone)]
pub struct Request {
    pub token: RequestToken,
    pub query: Query,
    /// Cancelled when a later request supersedes this one.
    pub cancel: CancellationToken,
}

/// The outcome of a dispatched request, posted back to the session.
#[derive(Debug)]
pub struct Completion {
    pub token: RequestToken,
    pub result: Result<Vec<LicenseRecord>, ClientError>,
}

/// What the lifecycle did with a [`Completion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Results replaced with this many records.
    Applied(usize),
    /// The response belonged to a request that is no longer current.
    Superseded,
    /// The transport reported cancellation.
    Cancelled,
    /// The current request failed; previous results are kept.
    Failed,
}

#[derive(Debug)]
struct InFlight {
    token: RequestToken,
    cancel: CancellationToken,
}

/// Owns a session's results and expand flags, and the one request allowed
/// to change them.
#[derive(Debug)]
pub struct RequestLifecycle {
    keys: KeyStrategy,
    results: Vec<LicenseRecord>,
    expand: ExpandState,
    in_flight: Option<InFlight>,
}

impl RequestLifecycle {
    pub fn new(keys: KeyStrategy) -> Self {
        Self {
            keys,
            results: Vec::new(),
            expand: ExpandState::default(),
            in_flight: None,
        }
    }

    /// Issues a request for `query`, superseding any request in flight.
    ///
    /// Returns `None` for an empty query; nothing changes in that case.
    pub fn issue(&mut self, query: Query) -> Option<Request> {
        if query.is_empty() {
            return None;
        }
        if let Some(previous) = self.in_flight.take() {
            tracing::debug!(token = %previous.token, "superseding in-flight request");
            previous.cancel.cancel();
        }
        let token = RequestToken::next();
        let cancel = CancellationToken::new();
        tracing::debug!(%token, ?query, "issuing request");
        self.in_flight = Some(InFlight {
            token,
            cancel: cancel.clone(),
        });
        Some(Request {
            token,
            query,
            cancel,
        })
    }

    /// Applies a completion if it belongs to the current request.
    pub fn resolve(&mut self, completion: Completion) -> Resolution {
        let Completion { token, result } = completion;
        let is_current = self.in_flight.as_ref().is_some_and(|f| f.token == token);

        match result {
            Err(err) if err.is_cancelled() => {
                if is_current {
                    self.in_flight = None;
                }
                tracing::debug!(%token, "request cancelled");
                Resolution::Cancelled
            }
            _ if !is_current => {
                tracing::debug!(%token, "discarding superseded response");
                Resolution::Superseded
            }
            Err(err) => {
                self.in_flight = None;
                tracing::warn!(%token, error = %err, "search request failed; keeping previous results");
                Resolution::Failed
            }
            Ok(records) => {
                self.in_flight = None;
                let count = records.len();
                self.results = records;
                self.expand.reset();
                tracing::debug!(%token, count, "applied search results");
                Resolution::Applied(count)
            }
        }
    }

    /// Cancels and forgets the in-flight request, if any.
    pub fn cancel(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.cancel.cancel();
        }
    }

    /// Token of the request currently in flight.
    pub fn in_flight(&self) -> Option<RequestToken> {
        self.in_flight.as_ref().map(|f| f.token)
    }

    pub fn results(&self) -> &[LicenseRecord] {
        &self.results
    }

    /// Flips the expand flag of the record at `index`; no-op when out of range.
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.results.get(index) {
            Some(record) => self.expand.toggle(self.keys.key_for(index, record)),
            None => false,
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.results
            .get(index)
            .is_some_and(|record| self.expand.is_expanded(&self.keys.key_for(index, record)))
    }
}
