//! Record-search service client.
//!
//! [`RecordSource`] is the seam between the lookup engine and the network;
//! [`HttpClient`] is the production implementation.

mod error;
mod http;

use std::future::Future;

pub use error::ClientError;
pub use http::HttpClient;

use crate::model::{LicenseRecord, Query};

/// Something that can answer a [`Query`] with license records.
pub trait RecordSource: Send + Sync {
    /// Runs one query. Implementations need not observe cancellation;
    /// the dispatcher drops the future when a request is superseded.
    fn fetch(
        &self,
        query: &Query,
    ) -> impl Future<Output = Result<Vec<LicenseRecord>, ClientError>> + Send;
}
