use std::fmt;

/// Amateur license tier, decoded from the single-letter ULS operator class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OperatorClass {
    Novice,
    Technician,
    General,
    Advanced,
    AmateurExtra,
    /// Any code the ULS does not define, including an empty one.
    #[default]
    Unknown,
}

static ALL_CLASSES: &[OperatorClass] = &[
    OperatorClass::Novice,
    OperatorClass::Technician,
    OperatorClass::General,
    OperatorClass::Advanced,
    OperatorClass::AmateurExtra,
];

impl OperatorClass {
    /// Maps a raw ULS code to a class. Never fails: unrecognized codes are `Unknown`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "N" => Self::Novice,
            "T" => Self::Technician,
            "G" => Self::General,
            "A" => Self::Advanced,
            "E" => Self::AmateurExtra,
            _ => Self::Unknown,
        }
    }

    /// Display label for the class.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Novice => "Novice",
            Self::Technician => "Technician",
            Self::General => "General",
            Self::Advanced => "Advanced",
            Self::AmateurExtra => "Amateur Extra",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns every class that has a ULS code.
    pub fn all() -> &'static [OperatorClass] {
        ALL_CLASSES
    }
}

impl From<Option<&str>> for OperatorClass {
    fn from(code: Option<&str>) -> Self {
        code.map_or(Self::Unknown, Self::from_code)
    }
}

#[mutants::skip]
impl fmt::Display for OperatorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
