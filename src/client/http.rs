use std::time::Duration;

use reqwest::{Client, Url};

use super::RecordSource;
use super::error::ClientError;
use crate::model::{LicenseRecord, Query, decode_records};

/// HTTP client for the `/api/v1` record-search endpoints.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: Client,
    base: Url,
    search_limit: Option<u32>,
}

impl HttpClient {
    /// Creates a client rooted at `base` (e.g. `http://localhost:3000/`).
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] for URLs that cannot carry a
    /// path, such as `mailto:` or `data:` URLs.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, ClientError> {
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base.to_string()));
        }
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("callbook/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base,
            search_limit: None,
        })
    }

    /// Sends `limit=<n>` with every multi-field search.
    pub fn with_search_limit(mut self, limit: Option<u32>) -> Self {
        self.search_limit = limit;
        self
    }

    /// Returns the host (and port, if any) of the service, for display.
    pub fn host(&self) -> String {
        match (self.base.host_str(), self.base.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => self.base.to_string(),
        }
    }

    /// Builds the endpoint URL for a query.
    ///
    /// The callsign is a single percent-encoded path segment, so portable
    /// designators like `W1AW/P` stay in one segment.
    fn endpoint(&self, query: &Query) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.set_query(None);
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ClientError::InvalidBaseUrl(self.base.to_string()))?;
            segments.pop_if_empty().extend(["api", "v1"]);
            match query {
                Query::Search(_) => {
                    segments.push("search");
                }
                Query::Callsign(call) => {
                    segments.push("call").push(call);
                }
            }
        }
        if let Query::Search(criteria) = query {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in criteria.query_pairs() {
                pairs.append_pair(name, value);
            }
            if let Some(limit) = self.search_limit {
                pairs.append_pair("limit", &limit.to_string());
            }
        }
        Ok(url)
    }
}

impl RecordSource for HttpClient {
    async fn fetch(&self, query: &Query) -> Result<Vec<LicenseRecord>, ClientError> {
        let url = self.endpoint(query)?;
        tracing::debug!(%url, "fetching records");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }
        let body = response.bytes().await?;
        Ok(decode_records(&body)?)
    }
}
