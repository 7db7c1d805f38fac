use serde::Deserialize;

use super::history::prior_callsign_summary;
use super::license_status::LicenseStatus;
use super::operator_class::OperatorClass;

/// One license record as returned by the record-search service.
///
/// Built only through [`decode_records`], which validates the wire shape, so
/// every string field is present (possibly empty) and `call_count >= 1`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LicenseRecord {
    pub call_sign: String,
    pub frn: String,
    pub first_name: String,
    pub middle_initial: String,
    pub last_name: String,
    pub city: String,
    pub state: String,
    /// Raw single-letter ULS code; see [`LicenseRecord::operator_class`].
    pub operator_class: String,
    /// Opaque display string.
    pub grant_date: String,
    pub call_count: u32,
    /// Comma-separated callsigns ever held, including the current one.
    pub call_history: String,
    pub license_status: String,
    pub expired_date: String,
    pub cancellation_date: String,
}

/// Identity of a record within a rendered result list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKey {
    /// Callsign plus FRN; one person may hold several records.
    Identity { call_sign: String, frn: String },
    /// Position in the list, for screens whose records share a callsign.
    Index(usize),
}

impl LicenseRecord {
    /// Collapsed one-line form: `First Last (CALL)`.
    pub fn headline(&self) -> String {
        format!("{} {} ({})", self.first_name, self.last_name, self.call_sign)
    }

    pub fn operator_class(&self) -> OperatorClass {
        OperatorClass::from_code(&self.operator_class)
    }

    /// Mapped license status, or `None` if the service did not send one.
    pub fn license_status(&self) -> Option<LicenseStatus> {
        (!self.license_status.is_empty()).then(|| LicenseStatus::from_code(&self.license_status))
    }

    /// Prior-callsign line, present only when `call_count > 1`.
    pub fn history_summary(&self) -> Option<String> {
        prior_callsign_summary(self.call_count, &self.call_history, &self.call_sign)
    }

    pub fn identity_key(&self) -> RecordKey {
        RecordKey::Identity {
            call_sign: self.call_sign.clone(),
            frn: self.frn.clone(),
        }
    }
}

/// Record as it appears on the wire. Every field is optional so that one
/// sparse record does not fail the whole response.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireRecord {
    call_sign: Option<String>,
    frn: Option<String>,
    first_name: Option<String>,
    mi: Option<String>,
    last_name: Option<String>,
    city: Option<String>,
    state: Option<String>,
    operator_class: Option<String>,
    grant_date: Option<String>,
    call_count: Option<i64>,
    call_history: Option<String>,
    license_status: Option<String>,
    expired_date: Option<String>,
    cancellation_date: Option<String>,
}

impl WireRecord {
    /// Validates into a [`LicenseRecord`]; `None` if the callsign is missing or blank.
    fn into_record(self) -> Option<LicenseRecord> {
        let call_sign = self.call_sign.map(|c| c.trim().to_string())?;
        if call_sign.is_empty() {
            return None;
        }
        let call_count = self
            .call_count
            .map_or(1, |n| u32::try_from(n.max(1)).unwrap_or(u32::MAX));
        Some(LicenseRecord {
            call_sign,
            frn: self.frn.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            middle_initial: self.mi.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            operator_class: self.operator_class.unwrap_or_default(),
            grant_date: self.grant_date.unwrap_or_default(),
            call_count,
            call_history: self.call_history.unwrap_or_default(),
            license_status: self.license_status.unwrap_or_default(),
            expired_date: self.expired_date.unwrap_or_default(),
            cancellation_date: self.cancellation_date.unwrap_or_default(),
        })
    }
}

/// Decodes a response body into records, dropping records without a callsign.
///
/// Fails only if the body is not a JSON array of record objects.
pub fn decode_records(body: &[u8]) -> Result<Vec<LicenseRecord>, serde_json::Error> {
    let wire: Vec<WireRecord> = serde_json::from_slice(body)?;
    let total = wire.len();
    let records: Vec<LicenseRecord> = wire
        .into_iter()
        .filter_map(WireRecord::into_record)
        .collect();
    if records.len() < total {
        tracing::warn!(
            dropped = total - records.len(),
            "discarded records without a callsign"
        );
    }
    Ok(records)
}
