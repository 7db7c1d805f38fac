use super::validation::normalize_callsign;

/// Multi-field search criteria. Blank fields are stored as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchCriteria {
    pub call_sign: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl SearchCriteria {
    /// Builds criteria from raw field values, trimming each and dropping blanks.
    pub fn new(call_sign: &str, first_name: &str, last_name: &str) -> Self {
        Self {
            call_sign: non_blank(&normalize_callsign(call_sign)),
            first_name: non_blank(first_name),
            last_name: non_blank(last_name),
        }
    }

    /// `true` when no field is set. Empty criteria never produce a request.
    pub fn is_empty(&self) -> bool {
        self.call_sign.is_none() && self.first_name.is_none() && self.last_name.is_none()
    }

    /// Query-string pairs for the set fields, in a fixed order.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("call_sign", &self.call_sign),
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
        .collect()
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// A lookup against the record-search service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Multi-field search (`/api/v1/search`).
    Search(SearchCriteria),
    /// Records for one callsign (`/api/v1/call/<callsign>`).
    Callsign(String),
}

impl Query {
    /// Builds a callsign query, normalizing the value.
    pub fn callsign(value: &str) -> Self {
        Self::Callsign(normalize_callsign(value))
    }

    /// `true` when the query carries nothing to look up.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Search(criteria) => criteria.is_empty(),
            Self::Callsign(call) => call.trim().is_empty(),
        }
    }
}
