use std::collections::HashMap;

use crate::model::{LicenseRecord, RecordKey};

/// How a screen identifies the records it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStrategy {
    /// Callsign plus FRN, for multi-result search screens.
    Identity,
    /// List position, for screens whose records share a callsign.
    Index,
}

impl KeyStrategy {
    pub fn key_for(self, index: usize, record: &LicenseRecord) -> RecordKey {
        match self {
            Self::Identity => record.identity_key(),
            Self::Index => RecordKey::Index(index),
        }
    }
}

/// Expanded/collapsed flag per rendered record. Absent keys are collapsed.
#[derive(Debug, Clone, Default)]
pub struct ExpandState {
    expanded: HashMap<RecordKey, bool>,
}

impl ExpandState {
    /// Flips one record's flag and returns its new value.
    pub fn toggle(&mut self, key: RecordKey) -> bool {
        let flag = self.expanded.entry(key).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn is_expanded(&self, key: &RecordKey) -> bool {
        self.expanded.get(key).copied().unwrap_or(false)
    }

    /// Collapses every record.
    pub fn reset(&mut self) {
        self.expanded.clear();
    }

    /// Number of records currently expanded.
    pub fn expanded_count(&self) -> usize {
        self.expanded.values().filter(|flag| **flag).count()
    }
}
