use chrono::NaiveDate;
use itr_core::models::{Gender, MaritalStatus, TaxpayerProfile};
use serde::{Deserialize, Serialize};

use crate::error::WizardError;

/// Payload submitted by the personal-details step.
///
/// Every field is optional so validation can test for *presence*
/// rather than truthiness: `Some(Gender::Male)` (the zero-valued
/// variant) and `Some(false)` are perfectly valid submissions, while
/// `None` is a missing required field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalDetailsForm {
    pub name: Option<String>,
    pub pan: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub marital_status: Option<MaritalStatus>,
    pub father_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,

    pub address_line: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,

    pub account_number: Option<String>,
    pub ifsc_code: Option<String>,
    pub bank_name: Option<String>,
}

impl PersonalDetailsForm {
    /// Names of required fields absent from this submission.
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.name.is_none() {
            missing.push("name");
        }
        if self.pan.is_none() {
            missing.push("pan");
        }
        if self.email.is_none() {
            missing.push("email");
        }
        if self.phone.is_none() {
            missing.push("phone");
        }
        if self.father_name.is_none() {
            missing.push("father_name");
        }
        if self.gender.is_none() {
            missing.push("gender");
        }
        if self.marital_status.is_none() {
            missing.push("marital_status");
        }
        missing.into_iter().map(str::to_string).collect()
    }

    pub fn validate(&self) -> Result<(), WizardError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(WizardError::Validation { missing })
        }
    }

    /// Write the submitted values onto the profile.
    ///
    /// `None` fields leave the existing value alone, so re-applying the
    /// same form is idempotent and optional fields keep whatever was
    /// restored or entered earlier.
    pub fn apply_to(
        &self,
        profile: &mut TaxpayerProfile,
    ) {
        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        if let Some(pan) = &self.pan {
            profile.pan = pan.clone();
        }
        if let Some(dob) = self.date_of_birth {
            profile.date_of_birth = Some(dob);
        }
        if let Some(gender) = self.gender {
            profile.gender = gender;
        }
        if let Some(marital_status) = self.marital_status {
            profile.marital_status = marital_status;
        }
        if let Some(father_name) = &self.father_name {
            profile.father_name = father_name.clone();
        }
        if let Some(email) = &self.email {
            profile.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            profile.phone = phone.clone();
        }
        if let Some(address_line) = &self.address_line {
            profile.address_line = address_line.clone();
        }
        if let Some(city) = &self.city {
            profile.city = city.clone();
        }
        if let Some(state) = &self.state {
            profile.state = state.clone();
        }
        if let Some(pincode) = &self.pincode {
            profile.pincode = pincode.clone();
        }
        if let Some(account_number) = &self.account_number {
            profile.account_number = account_number.clone();
        }
        if let Some(ifsc_code) = &self.ifsc_code {
            profile.ifsc_code = ifsc_code.clone();
        }
        if let Some(bank_name) = &self.bank_name {
            profile.bank_name = bank_name.clone();
        }
    }
}
