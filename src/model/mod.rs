mod criteria;
mod history;
mod license_status;
mod operator_class;
mod record;
mod validation;

pub use criteria::{Query, SearchCriteria};
pub use history::{prior_callsign_summary, prior_callsigns};
pub use license_status::LicenseStatus;
pub use operator_class::OperatorClass;
pub use record::{LicenseRecord, RecordKey, decode_records};
pub use validation::{is_callsign_char, normalize_callsign};
