use std::sync::Arc;

use chrono::Utc;
use itr_api::{
    CalculationRequest, CalculationResponse, DownloadFormat, DownloadResponse, FilingService,
    GenerationRequest, GenerationResponse, RecommendationRequest, RecommendationResponse,
};
use itr_core::merge::{MergeOutcome, merge_import, refresh_business_flags};
use itr_core::models::{ImportedIncomeSummary, IncomeComposition, WizardStep};
use itr_core::recommend::FormType;
use itr_store::{PersistedSnapshot, SnapshotStore};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::error::WizardError;
use crate::form::PersonalDetailsForm;
use crate::state::WizardState;

/// Default assessment year stamped on calculation requests.
const ASSESSMENT_YEAR: &str = "2026-27";

/// Data submitted with a forward step transition.
#[derive(Debug, Clone)]
pub enum StepPayload {
    PersonalDetails(PersonalDetailsForm),
    TaxData(IncomeComposition),
}

/// Combined result of the recommendation + generation round trip.
#[derive(Debug, Clone)]
pub struct FilingOutcome {
    pub recommendation: RecommendationResponse,
    pub generation: GenerationResponse,
}

/// The step state machine for the filing workflow.
///
/// Enforces legal step ordering, triggers persistence on committed
/// transitions, and brokers all calls to the external calculation and
/// generation service. Storage and service are injected so tests run
/// against [`itr_store::MemoryStore`] and a stub service.
pub struct WizardController {
    state: WizardState,
    store: Arc<dyn SnapshotStore>,
    service: Arc<dyn FilingService>,
    /// Simple in-flight guard: a second service request while one is
    /// outstanding is rejected, not queued.
    in_flight: bool,
}

impl WizardController {
    pub fn new(
        store: Arc<dyn SnapshotStore>,
        service: Arc<dyn FilingService>,
    ) -> Self {
        Self {
            state: WizardState::new(),
            store,
            service,
            in_flight: false,
        }
    }

    /// Read-only view of the accumulated state.
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.step
    }

    /// Whether a restorable snapshot exists, without loading it.
    pub async fn can_resume(&self) -> bool {
        self.store.has_saved_data().await
    }

    /// Load saved progress at wizard mount.
    ///
    /// Returns `true` when a snapshot was applied. Storage failures and
    /// stale-schema snapshots are absorbed: the wizard simply starts
    /// fresh.
    pub async fn restore(&mut self) -> bool {
        match self.store.load().await {
            Ok(Some(snapshot)) => {
                info!(step = ?snapshot.step, saved_at = %snapshot.saved_at, "restoring saved progress");
                self.state.profile = snapshot.profile;
                self.state.composition = snapshot.composition;
                self.state.step = snapshot.step;
                self.state.last_saved = Some(snapshot.saved_at);
                true
            }
            Ok(None) => false,
            Err(err) => {
                warn!(error = %err, "could not load saved progress; starting fresh");
                false
            }
        }
    }

    /// Discard saved progress and reset to a brand-new filing.
    pub async fn start_over(&mut self) {
        if let Err(err) = self.store.clear().await {
            warn!(error = %err, "failed to clear saved progress");
        }
        self.state = WizardState::new();
    }

    /// Commit a step's payload and move forward.
    ///
    /// The payload is validated against the step's required-field
    /// contract; on failure no state mutation occurs. Calling `advance`
    /// twice with an identical payload produces the same state, so a
    /// retry after a transient persistence failure is always safe.
    pub async fn advance(
        &mut self,
        from: WizardStep,
        payload: StepPayload,
    ) -> Result<(), WizardError> {
        if self.in_flight {
            return Err(WizardError::RequestInFlight);
        }
        match (from, payload) {
            (WizardStep::PersonalDetails, StepPayload::PersonalDetails(form)) => {
                form.validate()?;
                form.apply_to(&mut self.state.profile);
                self.state.step = WizardStep::TaxDataInput;
                self.persist().await;
                Ok(())
            }
            (WizardStep::TaxDataInput, StepPayload::TaxData(composition)) => {
                if self.state.step < WizardStep::TaxDataInput {
                    return Err(WizardError::InvalidTransition {
                        from,
                        current: self.state.step,
                    });
                }
                // Entering the results step requires a completed
                // calculation; data-only commits go through
                // `request_calculation`.
                if self.state.calculation.is_none() {
                    return Err(WizardError::CalculationRequired);
                }
                self.commit_tax_data(composition);
                self.state.step = WizardStep::TaxResults;
                self.persist().await;
                Ok(())
            }
            (from, _) => Err(WizardError::InvalidTransition {
                from,
                current: self.state.step,
            }),
        }
    }

    /// Move back to an earlier step. Never validates and discards no
    /// data: prior inputs stay in memory and in the store.
    pub fn retreat(
        &mut self,
        to: WizardStep,
    ) -> Result<(), WizardError> {
        if to >= self.state.step {
            return Err(WizardError::InvalidTransition {
                from: to,
                current: self.state.step,
            });
        }
        debug!(from = ?self.state.step, to = ?to, "retreating");
        self.state.step = to;
        Ok(())
    }

    /// Ingest an imported income summary.
    ///
    /// Pre-populates profile identity fields that still carry their
    /// placeholder values (user edits are never overwritten), then runs
    /// the income merger. The returned outcome tells the UI which
    /// manual-entry sub-forms to hide.
    pub async fn apply_import(
        &mut self,
        summary: ImportedIncomeSummary,
    ) -> MergeOutcome {
        self.state.profile.prefill_identity(&summary.name, &summary.pan);
        let outcome = merge_import(&mut self.state.composition, &summary, Utc::now());
        self.state.import_summary = Some(summary);
        self.persist().await;
        outcome
    }

    /// Commit the tax-data payload and ask the service for the tax
    /// liability.
    ///
    /// On success the result is stored and the wizard advances to the
    /// results step. On failure nothing partial is stored and the
    /// position does not change; the caller offers a retry.
    pub async fn request_calculation(
        &mut self,
        composition: IncomeComposition,
    ) -> Result<CalculationResponse, WizardError> {
        if self.in_flight {
            return Err(WizardError::RequestInFlight);
        }
        if self.state.step < WizardStep::TaxDataInput {
            return Err(WizardError::InvalidTransition {
                from: WizardStep::TaxDataInput,
                current: self.state.step,
            });
        }

        self.commit_tax_data(composition);
        let request = CalculationRequest {
            income_composition: self.state.composition.clone(),
            assessment_year: ASSESSMENT_YEAR.to_string(),
        };

        self.in_flight = true;
        let result = self.service.calculate(&request).await;
        self.in_flight = false;

        match result {
            Ok(response) => {
                self.state.calculation = Some(response.clone());
                self.state.step = WizardStep::TaxResults;
                self.persist().await;
                Ok(response)
            }
            Err(err) => {
                warn!(error = %err, "tax calculation failed; wizard position unchanged");
                Err(err.into())
            }
        }
    }

    /// Ask the service for a form recommendation and generate the
    /// return.
    ///
    /// The business-income flag and derived line items are always
    /// re-derived from the current composition first, so a stale or
    /// manually unset flag can never reach the service while numeric
    /// business fields are non-zero. A generation response with
    /// `is_success == false` is returned verbatim and the wizard does
    /// not advance.
    pub async fn request_recommendation_and_generation(
        &mut self,
        preferred_form_type: Option<FormType>,
    ) -> Result<FilingOutcome, WizardError> {
        if self.in_flight {
            return Err(WizardError::RequestInFlight);
        }
        let calculation = self
            .state
            .calculation
            .clone()
            .ok_or(WizardError::CalculationRequired)?;

        refresh_business_flags(&mut self.state.composition, Utc::now());
        let composition = self.state.composition.clone();

        let recommendation_request = RecommendationRequest {
            has_house_property: composition.has_house_property
                || composition.house_property_income > Decimal::ZERO,
            has_capital_gains: composition.has_capital_gains
                || composition.capital_gains_present(),
            has_business_income: composition.has_business_income
                || composition.business_income_present(),
            has_foreign_income: composition.has_foreign_income,
            has_foreign_assets: composition.has_foreign_assets
                || composition.foreign_assets_present(),
            is_huf: composition.is_huf,
            total_income: calculation.total_income,
            income_composition: composition.clone(),
        };

        self.in_flight = true;
        let recommendation = match self.service.recommend(&recommendation_request).await {
            Ok(recommendation) => recommendation,
            Err(err) => {
                self.in_flight = false;
                return Err(err.into());
            }
        };

        let generation_request = GenerationRequest {
            income_composition: composition,
            taxpayer_profile: self.state.profile.clone(),
            preferred_form_type,
        };
        let generation = self.service.generate(&generation_request).await;
        self.in_flight = false;
        let generation = generation?;

        if generation.is_success {
            self.state.generation = Some(generation.clone());
            self.state.step = WizardStep::ItrGeneration;
            self.persist().await;
        } else {
            warn!(
                errors = ?generation.validation_errors,
                "generation rejected by service; staying on results step"
            );
        }

        Ok(FilingOutcome {
            recommendation,
            generation,
        })
    }

    /// Download the generated return in the requested format.
    pub async fn download(
        &mut self,
        format: DownloadFormat,
    ) -> Result<DownloadResponse, WizardError> {
        if self.in_flight {
            return Err(WizardError::RequestInFlight);
        }
        let generation = self
            .state
            .generation
            .as_ref()
            .ok_or(WizardError::GenerationRequired)?;

        let request = GenerationRequest {
            income_composition: self.state.composition.clone(),
            taxpayer_profile: self.state.profile.clone(),
            preferred_form_type: Some(generation.recommended_type),
        };

        self.in_flight = true;
        let result = self.service.download(&request, format).await;
        self.in_flight = false;

        result.map_err(Into::into)
    }

    /// Explicit "save my progress" outside a step transition.
    pub async fn save_progress(&mut self) {
        self.persist().await;
    }

    /// Replace the composition with the submitted one and re-apply the
    /// import merge, if any. The merge is idempotent, so committing the
    /// same data repeatedly never duplicates derived entries.
    fn commit_tax_data(
        &mut self,
        composition: IncomeComposition,
    ) {
        self.state.composition = composition;
        if let Some(summary) = self.state.import_summary.clone() {
            merge_import(&mut self.state.composition, &summary, Utc::now());
        }
    }

    /// Write the snapshot. Failures are logged and absorbed: the
    /// in-memory state remains authoritative and the next committed
    /// transition retries.
    async fn persist(&mut self) {
        let now = Utc::now();
        let snapshot = PersistedSnapshot::new(
            self.state.profile.clone(),
            self.state.composition.clone(),
            self.state.step,
            now,
        );
        match self.store.save(&snapshot).await {
            Ok(()) => self.state.last_saved = Some(now),
            Err(err) => {
                warn!(error = %err, "failed to persist snapshot; keeping in-memory state")
            }
        }
    }
}
