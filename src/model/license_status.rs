/// ULS license status, decoded from the single-letter status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LicenseStatus {
    Active,
    Canceled,
    Expired,
    PendingLegalStatus,
    ParentStationCanceled,
    Terminated,
    TermPending,
    #[default]
    Unknown,
}

impl LicenseStatus {
    /// Maps a raw ULS status code. Unrecognized codes are `Unknown`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "A" => Self::Active,
            "C" => Self::Canceled,
            "E" => Self::Expired,
            "L" => Self::PendingLegalStatus,
            "P" => Self::ParentStationCanceled,
            "T" => Self::Terminated,
            "X" => Self::TermPending,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Canceled => "Canceled",
            Self::Expired => "Expired",
            Self::PendingLegalStatus => "Pending Legal Status",
            Self::ParentStationCanceled => "Parent Station Canceled",
            Self::Terminated => "Terminated",
            Self::TermPending => "Term Pending",
            Self::Unknown => "Unknown",
        }
    }
}
