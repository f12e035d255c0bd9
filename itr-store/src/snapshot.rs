use chrono::{DateTime, Utc};
use itr_core::models::{IncomeComposition, TaxpayerProfile, WizardStep};
use serde::{Deserialize, Serialize};

/// Current snapshot schema version.
///
/// Readers must check this marker before trusting anything else in the
/// snapshot; a mismatch means the data was written by a different
/// application version and is discarded wholesale rather than partially
/// applied.
pub const SCHEMA_VERSION: u32 = 1;

/// The serialized subset of wizard state written to durable storage.
///
/// Written on every committed step transition and on explicit save;
/// read once at wizard mount to offer restoration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    pub schema_version: u32,
    pub profile: TaxpayerProfile,
    pub composition: IncomeComposition,
    pub step: WizardStep,
    pub saved_at: DateTime<Utc>,
}

impl PersistedSnapshot {
    pub fn new(
        profile: TaxpayerProfile,
        composition: IncomeComposition,
        step: WizardStep,
        saved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            profile,
            composition,
            step,
            saved_at,
        }
    }
}
