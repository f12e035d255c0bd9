use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Taxpayer gender as reported on the return.
///
/// `Male` is the zero-valued variant; step validation must therefore test
/// for presence of a value, never for truthiness of its discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

/// Identity, contact and refund-bank details for the person filing.
///
/// Created with placeholder values at wizard start, edited during the
/// personal-details step, and read-only afterwards until the user
/// navigates back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxpayerProfile {
    pub name: String,
    /// Permanent Account Number (the national tax ID).
    pub pan: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub father_name: String,
    pub email: String,
    pub phone: String,

    pub address_line: String,
    pub city: String,
    pub state: String,
    pub pincode: String,

    // Bank details for refund credit
    pub account_number: String,
    pub ifsc_code: String,
    pub bank_name: String,
}

impl TaxpayerProfile {
    /// Placeholder profile shown when the wizard first mounts.
    pub fn sample() -> Self {
        Self {
            name: "Taxpayer Name".to_string(),
            pan: "ABCDE1234F".to_string(),
            date_of_birth: None,
            gender: Gender::Male,
            marital_status: MaritalStatus::Single,
            father_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address_line: String::new(),
            city: String::new(),
            state: String::new(),
            pincode: String::new(),
            account_number: String::new(),
            ifsc_code: String::new(),
            bank_name: String::new(),
        }
    }

    /// Pre-populate identity fields from an imported document.
    ///
    /// Only fields still carrying their placeholder (or empty) value are
    /// filled; anything the user has already edited is left alone.
    pub fn prefill_identity(
        &mut self,
        imported_name: &str,
        imported_pan: &str,
    ) {
        let sample = Self::sample();

        if !imported_name.is_empty() && (self.name.is_empty() || self.name == sample.name) {
            self.name = imported_name.to_string();
        }
        if !imported_pan.is_empty() && (self.pan.is_empty() || self.pan == sample.pan) {
            self.pan = imported_pan.to_string();
        }
    }
}

impl Default for TaxpayerProfile {
    fn default() -> Self {
        Self::sample()
    }
}
