//! Incremental search engine: debounced input, cancellable requests, and
//! per-record expand state.
//!
//! A [`SearchSession`] is a small state machine fed three kinds of
//! [`SessionEvent`]. It never performs I/O itself; when a query is due it
//! returns [`Effect::Dispatch`] and the caller hands the request to a
//! [`Dispatcher`], whose [`Completion`] comes back as another event. Only
//! the completion of the most recently issued request can change results.

mod debounce;
mod dispatch;
mod expand;
mod lifecycle;
mod session;

pub use debounce::{DEFAULT_QUIET_PERIOD, Debouncer};
pub use dispatch::Dispatcher;
pub use expand::{ExpandState, KeyStrategy};
pub use lifecycle::{Completion, Request, RequestLifecycle, RequestToken, Resolution};
pub use session::{Effect, Phase, SearchSession, SessionEvent};
