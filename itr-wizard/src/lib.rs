//! The wizard controller: the step state machine that sequences the
//! four stages of the filing workflow.
//!
//! The controller owns the single source of truth for wizard position
//! and accumulated data. Step components never mutate shared state;
//! they call back into [`WizardController`] (`advance`, `retreat`,
//! `request_calculation`, ...) and read the state snapshot it exposes.

mod controller;
mod error;
mod form;
mod state;

pub use controller::{FilingOutcome, StepPayload, WizardController};
pub use error::WizardError;
pub use form::PersonalDetailsForm;
pub use state::WizardState;
