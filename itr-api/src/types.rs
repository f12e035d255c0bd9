//! Wire shapes for the external calculation/generation service.
//!
//! Field names follow the service's camelCase JSON convention.

use itr_core::models::{IncomeComposition, TaxpayerProfile};
use itr_core::recommend::FormType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tax-liability calculation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    pub income_composition: IncomeComposition,
    pub assessment_year: String,
}

/// Liability/refund figures computed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    pub total_income: Decimal,
    pub taxable_income: Decimal,
    pub tax_payable: Decimal,
    pub taxes_paid: Decimal,
    pub refund_due: Decimal,
}

/// Server-side form recommendation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub income_composition: IncomeComposition,
    pub has_house_property: bool,
    pub has_capital_gains: bool,
    pub has_business_income: bool,
    pub has_foreign_income: bool,
    pub has_foreign_assets: bool,
    pub is_huf: bool,
    pub total_income: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub recommended_type: FormType,
    pub reason: String,
    pub requirements: Vec<String>,
    pub limitations: Vec<String>,
    pub can_use_itr1: bool,
    pub can_use_itr2: bool,
    pub summary: String,
}

/// ITR generation request; downloads reuse the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub income_composition: IncomeComposition,
    pub taxpayer_profile: TaxpayerProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_form_type: Option<FormType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub is_success: bool,
    pub recommended_type: FormType,
    #[serde(default)]
    pub form_xml: String,
    #[serde(default)]
    pub form_json: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub validation_errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub generation_summary: String,
}

/// Requested download flavor of the generated return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadFormat {
    Xml,
    Json,
}

impl DownloadFormat {
    pub fn extension(self) -> &'static str {
        match self {
            DownloadFormat::Xml => "xml",
            DownloadFormat::Json => "json",
        }
    }
}

/// Downloaded payload plus its suggested file name.
///
/// The file name is derived from the taxpayer's PAN and the chosen
/// format extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResponse {
    pub content: String,
    pub file_name: String,
}

impl DownloadResponse {
    pub fn suggested_file_name(
        pan: &str,
        format: DownloadFormat,
    ) -> String {
        format!("ITR_{pan}.{}", format.extension())
    }
}
