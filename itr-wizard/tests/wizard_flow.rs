//! End-to-end tests for the wizard controller against an in-memory
//! store and a stub filing service.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use itr_api::{
    CalculationRequest, CalculationResponse, DownloadFormat, DownloadResponse, FilingService,
    GenerationRequest, GenerationResponse, RecommendationRequest, RecommendationResponse,
    ServiceError,
};
use itr_core::models::{
    Gender, ImportedIncomeSummary, IncomeComposition, MaritalStatus, WizardStep,
};
use itr_core::recommend::FormType;
use itr_store::{MemoryStore, PersistedSnapshot, SnapshotStore, StoreError};
use itr_wizard::{PersonalDetailsForm, StepPayload, WizardController, WizardError};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing_subscriber::fmt::format::FmtSpan;

/// Initializes tracing for tests that exercise warn-level paths.
fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_span_events(FmtSpan::NONE)
        .with_test_writer()
        .finish();
    tracing::subscriber::set_default(subscriber)
}

/// Stub service with switchable failure modes; captures the last
/// recommendation request so tests can assert on what the controller
/// actually sent.
#[derive(Default)]
struct StubService {
    fail_calculation: AtomicBool,
    reject_generation: AtomicBool,
    last_recommendation_request: Mutex<Option<RecommendationRequest>>,
}

impl StubService {
    fn gross_income(composition: &IncomeComposition) -> Decimal {
        composition.basic_salary
            + composition.hra_received
            + composition.other_allowances
            + composition.savings_interest
            + composition.fd_interest
            + composition.dividend_income
            + composition.house_property_income
            + composition.capital_gains_total()
            + composition.foreign_assets_total()
            + composition.business_income_total()
    }
}

#[async_trait]
impl FilingService for StubService {
    async fn calculate(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationResponse, ServiceError> {
        if self.fail_calculation.load(Ordering::SeqCst) {
            return Err(ServiceError::Network("connection refused".to_string()));
        }
        let total_income = Self::gross_income(&request.income_composition);
        Ok(CalculationResponse {
            total_income,
            taxable_income: total_income,
            tax_payable: dec!(10000),
            taxes_paid: dec!(2000),
            refund_due: dec!(0),
        })
    }

    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResponse, ServiceError> {
        *self.last_recommendation_request.lock().unwrap() = Some(request.clone());
        let result = itr_core::recommend(&request.income_composition, request.total_income);
        Ok(RecommendationResponse {
            recommended_type: result.form_type,
            reason: result.reason,
            requirements: result.requirements,
            limitations: result.limitations,
            can_use_itr1: result.form_type == FormType::Itr1,
            can_use_itr2: result.form_type != FormType::Itr3,
            summary: format!("{} recommended", result.form_type),
        })
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, ServiceError> {
        if self.reject_generation.load(Ordering::SeqCst) {
            return Ok(GenerationResponse {
                is_success: false,
                recommended_type: FormType::Itr3,
                form_xml: String::new(),
                form_json: String::new(),
                file_name: String::new(),
                validation_errors: vec!["Bank IFSC code failed validation".to_string()],
                warnings: vec![],
                generation_summary: String::new(),
            });
        }
        let result = itr_core::recommend(&request.income_composition, Decimal::ZERO);
        Ok(GenerationResponse {
            is_success: true,
            recommended_type: request.preferred_form_type.unwrap_or(result.form_type),
            form_xml: "<ITRForm/>".to_string(),
            form_json: "{}".to_string(),
            file_name: format!("ITR_{}.xml", request.taxpayer_profile.pan),
            validation_errors: vec![],
            warnings: vec![],
            generation_summary: "generated".to_string(),
        })
    }

    async fn download(
        &self,
        request: &GenerationRequest,
        format: DownloadFormat,
    ) -> Result<DownloadResponse, ServiceError> {
        Ok(DownloadResponse {
            content: "<ITRForm/>".to_string(),
            file_name: DownloadResponse::suggested_file_name(
                &request.taxpayer_profile.pan,
                format,
            ),
        })
    }
}

/// Store whose saves always fail, for exercising the
/// persistence-is-non-fatal path.
struct FailingStore;

#[async_trait]
impl SnapshotStore for FailingStore {
    async fn save(&self, _snapshot: &PersistedSnapshot) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("disk full")))
    }

    async fn load(&self) -> Result<Option<PersistedSnapshot>, StoreError> {
        Ok(None)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn has_saved_data(&self) -> bool {
        false
    }
}

fn complete_personal_details() -> PersonalDetailsForm {
    PersonalDetailsForm {
        name: Some("Asha Verma".to_string()),
        pan: Some("AAAPV1234C".to_string()),
        email: Some("asha@example.com".to_string()),
        phone: Some("9876543210".to_string()),
        father_name: Some("Mohan Verma".to_string()),
        gender: Some(Gender::Female),
        marital_status: Some(MaritalStatus::Married),
        ..PersonalDetailsForm::default()
    }
}

fn controller_with(
    store: Arc<dyn SnapshotStore>,
    service: Arc<StubService>,
) -> WizardController {
    WizardController::new(store, service)
}

fn new_controller() -> (WizardController, Arc<StubService>) {
    let service = Arc::new(StubService::default());
    let controller = controller_with(Arc::new(MemoryStore::new()), Arc::clone(&service));
    (controller, service)
}

async fn advance_past_personal_details(controller: &mut WizardController) {
    controller
        .advance(
            WizardStep::PersonalDetails,
            StepPayload::PersonalDetails(complete_personal_details()),
        )
        .await
        .expect("personal details should validate");
}

// =============================================================================
// Step validation
// =============================================================================

#[tokio::test]
async fn advance_rejects_missing_gender_and_marital_status() {
    let (mut controller, _) = new_controller();
    let form = PersonalDetailsForm {
        gender: None,
        marital_status: None,
        ..complete_personal_details()
    };

    let result = controller
        .advance(WizardStep::PersonalDetails, StepPayload::PersonalDetails(form))
        .await;

    match result {
        Err(WizardError::Validation { missing }) => {
            assert_eq!(missing, vec!["gender", "marital_status"]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(controller.current_step(), WizardStep::PersonalDetails);
}

#[tokio::test]
async fn advance_accepts_zero_valued_gender_variant() {
    let (mut controller, _) = new_controller();
    let form = PersonalDetailsForm {
        gender: Some(Gender::Male),
        marital_status: Some(MaritalStatus::Single),
        ..complete_personal_details()
    };

    controller
        .advance(WizardStep::PersonalDetails, StepPayload::PersonalDetails(form))
        .await
        .unwrap();

    assert_eq!(controller.current_step(), WizardStep::TaxDataInput);
}

#[tokio::test]
async fn advance_twice_with_identical_payload_is_idempotent() {
    let (mut controller, _) = new_controller();

    advance_past_personal_details(&mut controller).await;
    let after_first = controller.state().clone();

    advance_past_personal_details(&mut controller).await;

    // last_saved moves with the second write; everything else is equal.
    let mut after_second = controller.state().clone();
    after_second.last_saved = after_first.last_saved;
    assert_eq!(after_second, after_first);
}

#[tokio::test]
async fn advance_with_mismatched_payload_is_rejected() {
    let (mut controller, _) = new_controller();

    let result = controller
        .advance(
            WizardStep::TaxResults,
            StepPayload::TaxData(IncomeComposition::default()),
        )
        .await;

    assert!(matches!(result, Err(WizardError::InvalidTransition { .. })));
}

// =============================================================================
// Calculation
// =============================================================================

#[tokio::test]
async fn successful_calculation_stores_result_and_advances() {
    let (mut controller, _) = new_controller();
    advance_past_personal_details(&mut controller).await;
    let composition = IncomeComposition {
        basic_salary: dec!(900000),
        has_salary: true,
        ..IncomeComposition::default()
    };

    let response = controller.request_calculation(composition).await.unwrap();

    assert_eq!(response.total_income, dec!(900000));
    assert_eq!(controller.current_step(), WizardStep::TaxResults);
    assert_eq!(controller.state().calculation, Some(response));
}

#[tokio::test]
async fn failed_calculation_leaves_position_unchanged() {
    let (mut controller, service) = new_controller();
    advance_past_personal_details(&mut controller).await;
    service.fail_calculation.store(true, Ordering::SeqCst);

    let result = controller
        .request_calculation(IncomeComposition::default())
        .await;

    assert!(matches!(result, Err(WizardError::Service(_))));
    assert_eq!(controller.current_step(), WizardStep::TaxDataInput);
    assert_eq!(controller.state().calculation, None);

    // The failure is recoverable: a retry succeeds.
    service.fail_calculation.store(false, Ordering::SeqCst);
    controller
        .request_calculation(IncomeComposition::default())
        .await
        .unwrap();
    assert_eq!(controller.current_step(), WizardStep::TaxResults);
}

#[tokio::test]
async fn calculation_before_personal_details_is_rejected() {
    let (mut controller, _) = new_controller();

    let result = controller
        .request_calculation(IncomeComposition::default())
        .await;

    assert!(matches!(result, Err(WizardError::InvalidTransition { .. })));
}

// =============================================================================
// Recommendation and generation
// =============================================================================

#[tokio::test]
async fn generation_requires_a_completed_calculation() {
    let (mut controller, _) = new_controller();
    advance_past_personal_details(&mut controller).await;

    let result = controller.request_recommendation_and_generation(None).await;

    assert!(matches!(result, Err(WizardError::CalculationRequired)));
}

#[tokio::test]
async fn happy_path_reaches_generation_and_download() {
    let (mut controller, _) = new_controller();
    advance_past_personal_details(&mut controller).await;
    let composition = IncomeComposition {
        basic_salary: dec!(700000),
        has_salary: true,
        ..IncomeComposition::default()
    };
    controller.request_calculation(composition).await.unwrap();

    let outcome = controller
        .request_recommendation_and_generation(None)
        .await
        .unwrap();

    assert!(outcome.generation.is_success);
    assert_eq!(outcome.recommendation.recommended_type, FormType::Itr1);
    assert_eq!(controller.current_step(), WizardStep::ItrGeneration);

    let download = controller.download(DownloadFormat::Xml).await.unwrap();
    assert_eq!(download.file_name, "ITR_AAAPV1234C.xml");

    let download = controller.download(DownloadFormat::Json).await.unwrap();
    assert_eq!(download.file_name, "ITR_AAAPV1234C.json");
}

#[tokio::test]
async fn rejected_generation_surfaces_errors_and_does_not_advance() {
    let (mut controller, service) = new_controller();
    advance_past_personal_details(&mut controller).await;
    controller
        .request_calculation(IncomeComposition::default())
        .await
        .unwrap();
    service.reject_generation.store(true, Ordering::SeqCst);

    let outcome = controller
        .request_recommendation_and_generation(None)
        .await
        .unwrap();

    assert!(!outcome.generation.is_success);
    assert_eq!(
        outcome.generation.validation_errors,
        vec!["Bank IFSC code failed validation".to_string()]
    );
    assert_eq!(controller.current_step(), WizardStep::TaxResults);
    assert_eq!(controller.state().generation, None);

    let result = controller.download(DownloadFormat::Xml).await;
    assert!(matches!(result, Err(WizardError::GenerationRequired)));
}

#[tokio::test]
async fn stale_business_flag_is_rederived_before_generation() {
    let (mut controller, service) = new_controller();
    advance_past_personal_details(&mut controller).await;
    // Non-zero business amounts but the toggle was never set — e.g. a
    // caller supplying a stale composition.
    let composition = IncomeComposition {
        intraday_trading_income: dec!(5000),
        stocks_ltcg: dec!(200000),
        has_business_income: false,
        ..IncomeComposition::default()
    };
    controller.request_calculation(composition).await.unwrap();

    let outcome = controller
        .request_recommendation_and_generation(None)
        .await
        .unwrap();

    let sent = service
        .last_recommendation_request
        .lock()
        .unwrap()
        .clone()
        .expect("recommendation request was sent");
    assert!(sent.has_business_income);
    assert!(controller.state().composition.has_business_income);
    assert_eq!(outcome.recommendation.recommended_type, FormType::Itr3);
    assert!(outcome.recommendation.reason.contains("Intraday trading"));
}

// =============================================================================
// Import handling
// =============================================================================

#[tokio::test]
async fn import_prefills_identity_and_forces_area_toggles() {
    let (mut controller, _) = new_controller();
    let summary = ImportedIncomeSummary {
        name: "Asha Verma".to_string(),
        pan: "AAAPV1234C".to_string(),
        stocks_ltcg: dec!(120000),
        intraday_trading_income: dec!(54000),
        ..ImportedIncomeSummary::default()
    };

    let outcome = controller.apply_import(summary).await;

    assert!(outcome.capital_gains_imported);
    assert!(outcome.business_imported);
    assert!(!outcome.foreign_assets_imported);
    let state = controller.state();
    assert_eq!(state.profile.name, "Asha Verma");
    assert!(state.composition.has_capital_gains);
    assert!(state.composition.has_business_income);
    assert_eq!(state.composition.business_income_items.len(), 1);
}

#[tokio::test]
async fn committing_tax_data_after_import_does_not_duplicate_derived_items() {
    let (mut controller, _) = new_controller();
    advance_past_personal_details(&mut controller).await;
    let summary = ImportedIncomeSummary {
        intraday_trading_income: dec!(54000),
        ..ImportedIncomeSummary::default()
    };
    controller.apply_import(summary).await;

    // The tax-data step commits the current composition back; the
    // re-merge must not append the derived item a second time.
    let committed = controller.state().composition.clone();
    controller.request_calculation(committed).await.unwrap();

    assert_eq!(
        controller.state().composition.business_income_items.len(),
        1
    );
}

// =============================================================================
// Retreat
// =============================================================================

#[tokio::test]
async fn retreat_moves_back_without_discarding_data() {
    let (mut controller, _) = new_controller();
    advance_past_personal_details(&mut controller).await;
    controller
        .request_calculation(IncomeComposition {
            basic_salary: dec!(600000),
            ..IncomeComposition::default()
        })
        .await
        .unwrap();

    controller.retreat(WizardStep::PersonalDetails).unwrap();

    assert_eq!(controller.current_step(), WizardStep::PersonalDetails);
    assert_eq!(controller.state().profile.name, "Asha Verma");
    assert_eq!(controller.state().composition.basic_salary, dec!(600000));
}

#[tokio::test]
async fn retreat_to_current_or_later_step_is_rejected() {
    let (mut controller, _) = new_controller();
    advance_past_personal_details(&mut controller).await;

    assert!(matches!(
        controller.retreat(WizardStep::TaxDataInput),
        Err(WizardError::InvalidTransition { .. })
    ));
    assert!(matches!(
        controller.retreat(WizardStep::ItrGeneration),
        Err(WizardError::InvalidTransition { .. })
    ));
}

// =============================================================================
// Persistence and restore
// =============================================================================

#[tokio::test]
async fn progress_survives_a_restart() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let service = Arc::new(StubService::default());
    let mut first = controller_with(store.clone(), Arc::clone(&service));
    advance_past_personal_details(&mut first).await;
    first
        .request_calculation(IncomeComposition {
            basic_salary: dec!(900000),
            ..IncomeComposition::default()
        })
        .await
        .unwrap();

    let mut second = controller_with(store, service);
    assert!(second.can_resume().await);
    assert!(second.restore().await);

    assert_eq!(second.current_step(), WizardStep::TaxResults);
    assert_eq!(second.state().profile.name, "Asha Verma");
    assert_eq!(second.state().composition.basic_salary, dec!(900000));
    assert!(second.state().last_saved.is_some());
}

#[tokio::test]
async fn start_over_clears_saved_progress() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    let service = Arc::new(StubService::default());
    let mut controller = controller_with(store.clone(), service);
    advance_past_personal_details(&mut controller).await;
    assert!(controller.can_resume().await);

    controller.start_over().await;

    assert!(!controller.can_resume().await);
    assert_eq!(controller.current_step(), WizardStep::PersonalDetails);
    assert_eq!(controller.state().profile.name, "Taxpayer Name");
}

#[tokio::test]
async fn explicit_save_records_last_saved_timestamp() {
    let (mut controller, _) = new_controller();
    assert!(!controller.can_resume().await);

    controller.save_progress().await;

    assert!(controller.can_resume().await);
    assert!(controller.state().last_saved.is_some());
}

#[tokio::test]
async fn restore_without_saved_data_starts_fresh() {
    let (mut controller, _) = new_controller();

    assert!(!controller.restore().await);
    assert_eq!(controller.current_step(), WizardStep::PersonalDetails);
}

#[tokio::test]
async fn persistence_failure_does_not_block_forward_progress() {
    let _guard = init_test_tracing();
    let service = Arc::new(StubService::default());
    let mut controller = controller_with(Arc::new(FailingStore), Arc::clone(&service));

    advance_past_personal_details(&mut controller).await;

    assert_eq!(controller.current_step(), WizardStep::TaxDataInput);
    assert_eq!(controller.state().last_saved, None);

    // The workflow keeps going all the way to calculation.
    controller
        .request_calculation(IncomeComposition::default())
        .await
        .unwrap();
    assert_eq!(controller.current_step(), WizardStep::TaxResults);
}
