mod imported_summary;
mod income_composition;
mod line_items;
mod taxpayer_profile;
mod wizard_step;

pub use imported_summary::ImportedIncomeSummary;
pub use income_composition::IncomeComposition;
pub use line_items::{BusinessExpenseItem, BusinessIncomeItem};
pub use taxpayer_profile::{Gender, MaritalStatus, TaxpayerProfile};
pub use wizard_step::WizardStep;
