use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use super::lifecycle::{Completion, Request};
use crate::client::{ClientError, RecordSource};

/// Runs issued requests on the async runtime and posts their completions
/// back to the event loop.
pub struct Dispatcher<S> {
    source: Arc<S>,
    completions: UnboundedSender<Completion>,
}

impl<S> Clone for Dispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            completions: self.completions.clone(),
        }
    }
}

impl<S: RecordSource + 'static> Dispatcher<S> {
    pub fn new(source: S, completions: UnboundedSender<Completion>) -> Self {
        Self {
            source: Arc::new(source),
            completions,
        }
    }

    /// Spawns `request`. A cancelled request completes with
    /// [`ClientError::Cancelled`] without waiting for the source.
    pub fn dispatch(&self, request: Request) {
        let source = Arc::clone(&self.source);
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let Request {
                token,
                query,
                cancel,
            } = request;
            let result = tokio::select! {
                biased;
                () = cancel.cancelled() => Err(ClientError::Cancelled),
                result = source.fetch(&query) => result,
            };
            // The receiver is gone once the app has shut down.
            let _ = completions.send(Completion { token, result });
        });
    }
}
