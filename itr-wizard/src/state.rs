use chrono::{DateTime, Utc};
use itr_api::{CalculationResponse, GenerationResponse};
use itr_core::models::{ImportedIncomeSummary, IncomeComposition, TaxpayerProfile, WizardStep};

/// All cross-step wizard state.
///
/// Owned exclusively by the controller, which is the sole writer; step
/// components receive a shared reference and communicate changes back
/// through controller methods.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WizardState {
    pub step: WizardStep,
    pub profile: TaxpayerProfile,
    pub composition: IncomeComposition,
    /// The imported summary, kept so later data commits can re-merge.
    pub import_summary: Option<ImportedIncomeSummary>,
    pub calculation: Option<CalculationResponse>,
    pub generation: Option<GenerationResponse>,
    pub last_saved: Option<DateTime<Utc>>,
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            step: WizardStep::PersonalDetails,
            profile: TaxpayerProfile::sample(),
            composition: IncomeComposition::default(),
            import_summary: None,
            calculation: None,
            generation: None,
            last_saved: None,
        }
    }
}
