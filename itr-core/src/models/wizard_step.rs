use serde::{Deserialize, Serialize};

/// The four stages of the filing workflow, in order.
///
/// Forward transitions are gated by the wizard controller; backward
/// transitions to any earlier step are always legal and discard no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    PersonalDetails,
    TaxDataInput,
    TaxResults,
    ItrGeneration,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::PersonalDetails,
        WizardStep::TaxDataInput,
        WizardStep::TaxResults,
        WizardStep::ItrGeneration,
    ];

    /// Zero-based position used by the persisted snapshot.
    pub fn index(self) -> usize {
        match self {
            WizardStep::PersonalDetails => 0,
            WizardStep::TaxDataInput => 1,
            WizardStep::TaxResults => 2,
            WizardStep::ItrGeneration => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The following step, or `None` at the end of the workflow.
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::PersonalDetails => "Personal Details",
            WizardStep::TaxDataInput => "Tax Data",
            WizardStep::TaxResults => "Tax Results",
            WizardStep::ItrGeneration => "ITR Generation",
        }
    }
}
