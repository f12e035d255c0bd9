//! Rule-based engine mapping an income composition to the required
//! ITR form type.
//!
//! The decision order encodes legal precedence, not convenience: any
//! business or professional income forces ITR-3 regardless of what else
//! is present, because the form-eligibility rules make business income
//! (even a loss-making business) disqualifying for the simpler forms.
//! Investment income, foreign exposure, house property, and total
//! income above the high-income limit force ITR-2. Everything else is a
//! plain salaried profile and ITR-1 suffices.
//!
//! `recommend` is a pure function: no I/O, identical inputs always
//! produce an identical result.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::IncomeComposition;

/// Total-income limit for ITR-1 eligibility (₹50,00,000).
///
/// Exactly at the limit is still ITR-1 territory; strictly above it is
/// not.
pub const HIGH_INCOME_THRESHOLD: Decimal = Decimal::from_parts(5_000_000, 0, 0, false, 0);

/// The required tax-return form type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormType {
    /// Salary-only, low-complexity profile.
    #[serde(rename = "ITR-1")]
    Itr1,
    /// Investment income, foreign exposure, or higher-income salaried.
    #[serde(rename = "ITR-2")]
    Itr2,
    /// Business or professional income.
    #[serde(rename = "ITR-3")]
    Itr3,
}

impl std::fmt::Display for FormType {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let name = match self {
            FormType::Itr1 => "ITR-1",
            FormType::Itr2 => "ITR-2",
            FormType::Itr3 => "ITR-3",
        };
        write!(f, "{name}")
    }
}

/// Output of the recommendation engine.
///
/// A derived view, recomputed whenever the composition changes — never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub form_type: FormType,
    /// Names the specific trigger that forced the decision.
    pub reason: String,
    pub requirements: Vec<String>,
    pub limitations: Vec<String>,
}

/// Recommend the required ITR form for the given composition.
///
/// First match wins, in order: business income, then the ITR-2
/// triggers, then the salaried default.
///
/// ```
/// use rust_decimal_macros::dec;
/// use itr_core::models::IncomeComposition;
/// use itr_core::recommend::{FormType, recommend};
///
/// let composition = IncomeComposition {
///     intraday_trading_income: dec!(5000),
///     stocks_ltcg: dec!(200000),
///     ..IncomeComposition::default()
/// };
///
/// // Business income wins over the capital gain that is also present.
/// let result = recommend(&composition, dec!(800000));
/// assert_eq!(result.form_type, FormType::Itr3);
/// ```
pub fn recommend(
    composition: &IncomeComposition,
    total_income: Decimal,
) -> RecommendationResult {
    if composition.business_income_present() || composition.has_business_income {
        return business_recommendation(composition);
    }

    if let Some(trigger) = itr2_trigger(composition, total_income) {
        return itr2_recommendation(trigger);
    }

    itr1_recommendation()
}

fn business_recommendation(composition: &IncomeComposition) -> RecommendationResult {
    let reason = if composition.intraday_trading_income > Decimal::ZERO {
        format!(
            "Intraday trading income of ₹{} is business income and requires ITR-3",
            composition.intraday_trading_income
        )
    } else if composition.other_business_income > Decimal::ZERO {
        format!(
            "Business income of ₹{} requires ITR-3",
            composition.other_business_income
        )
    } else if composition.professional_income > Decimal::ZERO {
        format!(
            "Professional income of ₹{} requires ITR-3",
            composition.professional_income
        )
    } else {
        "Business income was declared and requires ITR-3".to_string()
    };

    RecommendationResult {
        form_type: FormType::Itr3,
        reason,
        requirements: vec![
            "Profit and loss statement for the business or profession".to_string(),
            "Balance sheet where books of account are maintained".to_string(),
            "Details of presumptive taxation election, if opted".to_string(),
        ],
        limitations: vec![
            "Longest form with the most disclosure requirements".to_string(),
            "Tax audit may apply above the turnover limits".to_string(),
        ],
    }
}

fn itr2_trigger(
    composition: &IncomeComposition,
    total_income: Decimal,
) -> Option<String> {
    if composition.capital_gains_present() || composition.has_capital_gains {
        return Some(format!(
            "Capital gains of ₹{} require ITR-2",
            composition.capital_gains_total()
        ));
    }
    if total_income > HIGH_INCOME_THRESHOLD {
        return Some(format!(
            "Total income of ₹{total_income} exceeds the ₹{HIGH_INCOME_THRESHOLD} ITR-1 limit"
        ));
    }
    if composition.foreign_assets_present()
        || composition.has_foreign_assets
        || composition.has_foreign_income
    {
        return Some("Foreign income or foreign assets require ITR-2".to_string());
    }
    if composition.house_property_income > Decimal::ZERO || composition.has_house_property {
        return Some("House property income requires ITR-2".to_string());
    }
    None
}

fn itr2_recommendation(reason: String) -> RecommendationResult {
    RecommendationResult {
        form_type: FormType::Itr2,
        reason,
        requirements: vec![
            "Schedule CG for each capital-gains category".to_string(),
            "Schedule FA for foreign assets, where applicable".to_string(),
        ],
        limitations: vec![
            "Not available once business or professional income exists".to_string(),
        ],
    }
}

fn itr1_recommendation() -> RecommendationResult {
    RecommendationResult {
        form_type: FormType::Itr1,
        reason: "Salary-only profile within the ITR-1 income limit".to_string(),
        requirements: vec![
            "Form 16 from the employer".to_string(),
            "Interest certificates from banks".to_string(),
        ],
        limitations: vec![
            "Total income must not exceed ₹50,00,000".to_string(),
            "No capital gains, business income, or foreign assets".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // Precedence
    // =========================================================================

    #[test]
    fn business_income_wins_over_large_capital_gains() {
        let composition = IncomeComposition {
            other_business_income: dec!(1),
            stocks_ltcg: dec!(1000000),
            ..IncomeComposition::default()
        };

        let result = recommend(&composition, dec!(1000001));

        assert_eq!(result.form_type, FormType::Itr3);
    }

    #[test]
    fn manual_business_toggle_alone_forces_itr3() {
        let composition = IncomeComposition {
            has_business_income: true,
            ..IncomeComposition::default()
        };

        let result = recommend(&composition, dec!(400000));

        assert_eq!(result.form_type, FormType::Itr3);
        assert_eq!(result.reason, "Business income was declared and requires ITR-3");
    }

    #[test]
    fn end_to_end_intraday_scenario_cites_intraday_trading() {
        let composition = IncomeComposition {
            intraday_trading_income: dec!(5000),
            other_business_income: dec!(0),
            stocks_ltcg: dec!(200000),
            has_foreign_assets: false,
            ..IncomeComposition::default()
        };

        let result = recommend(&composition, dec!(800000));

        assert_eq!(result.form_type, FormType::Itr3);
        assert!(result.reason.contains("Intraday trading"));
    }

    // =========================================================================
    // ITR-2 triggers
    // =========================================================================

    #[test]
    fn capital_gains_alone_recommend_itr2() {
        let composition = IncomeComposition {
            mutual_funds_ltcg: dec!(80000),
            ..IncomeComposition::default()
        };

        let result = recommend(&composition, dec!(700000));

        assert_eq!(result.form_type, FormType::Itr2);
        assert!(result.reason.contains("Capital gains"));
    }

    #[test]
    fn foreign_assets_alone_recommend_itr2() {
        let composition = IncomeComposition {
            rsu_gains: dec!(150000),
            ..IncomeComposition::default()
        };

        let result = recommend(&composition, dec!(900000));

        assert_eq!(result.form_type, FormType::Itr2);
        assert!(result.reason.contains("Foreign"));
    }

    #[test]
    fn house_property_alone_recommends_itr2() {
        let composition = IncomeComposition {
            house_property_income: dec!(240000),
            ..IncomeComposition::default()
        };

        let result = recommend(&composition, dec!(1000000));

        assert_eq!(result.form_type, FormType::Itr2);
        assert!(result.reason.contains("House property"));
    }

    // =========================================================================
    // High-income threshold boundary
    // =========================================================================

    #[test]
    fn income_exactly_at_threshold_stays_itr1() {
        let composition = IncomeComposition {
            basic_salary: dec!(5000000),
            ..IncomeComposition::default()
        };

        let result = recommend(&composition, dec!(5000000));

        assert_eq!(result.form_type, FormType::Itr1);
    }

    #[test]
    fn income_one_above_threshold_moves_to_itr2() {
        let composition = IncomeComposition {
            basic_salary: dec!(5000001),
            ..IncomeComposition::default()
        };

        let result = recommend(&composition, dec!(5000001));

        assert_eq!(result.form_type, FormType::Itr2);
        assert!(result.reason.contains("exceeds"));
    }

    // =========================================================================
    // Default branch and determinism
    // =========================================================================

    #[test]
    fn plain_salary_profile_recommends_itr1() {
        let composition = IncomeComposition {
            basic_salary: dec!(750000),
            savings_interest: dec!(12000),
            has_salary: true,
            ..IncomeComposition::default()
        };

        let result = recommend(&composition, dec!(762000));

        assert_eq!(result.form_type, FormType::Itr1);
        assert!(!result.requirements.is_empty());
        assert!(!result.limitations.is_empty());
    }

    #[test]
    fn identical_inputs_produce_identical_results() {
        let composition = IncomeComposition {
            stocks_stcg: dec!(40000),
            ..IncomeComposition::default()
        };

        let first = recommend(&composition, dec!(600000));
        let second = recommend(&composition, dec!(600000));

        assert_eq!(first, second);
    }
}
