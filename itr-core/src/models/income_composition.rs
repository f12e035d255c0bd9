use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::line_items::{BusinessExpenseItem, BusinessIncomeItem};

/// The canonical record of a taxpayer's income sources for one
/// assessment year.
///
/// Every amount is a plain `Decimal` defaulted to zero, never an
/// `Option` — sparse input is normalized at the ingestion boundary
/// (`#[serde(default)]`), so downstream computations never see an
/// absent field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeComposition {
    // Salary
    pub basic_salary: Decimal,
    pub hra_received: Decimal,
    pub other_allowances: Decimal,

    // Interest and dividends
    pub savings_interest: Decimal,
    pub fd_interest: Decimal,
    pub dividend_income: Decimal,

    // House property
    pub house_property_income: Decimal,

    // Capital gains
    pub stocks_stcg: Decimal,
    pub stocks_ltcg: Decimal,
    pub mutual_funds_stcg: Decimal,
    pub mutual_funds_ltcg: Decimal,
    pub fno_gains: Decimal,
    pub real_estate_gains: Decimal,
    pub bonds_gains: Decimal,
    pub gold_gains: Decimal,
    pub crypto_gains: Decimal,

    // Foreign assets and income
    pub us_stocks_gains: Decimal,
    pub rsu_gains: Decimal,
    pub foreign_interest_income: Decimal,

    // Business and professional income
    pub intraday_trading_income: Decimal,
    pub other_business_income: Decimal,
    pub professional_income: Decimal,
    pub trading_expenses: Decimal,
    pub other_business_expenses: Decimal,

    // Area toggles ("I have X" in the tax-data step)
    pub has_salary: bool,
    pub has_house_property: bool,
    pub has_capital_gains: bool,
    pub has_foreign_assets: bool,
    pub has_foreign_income: bool,
    pub has_business_income: bool,
    pub is_huf: bool,

    // Compliance disclosures for the business path
    pub presumptive_taxation: bool,
    pub audit_required: bool,
    pub maintains_books: bool,

    // Ordered lists built by the user plus entries derived from imports
    pub business_income_items: Vec<BusinessIncomeItem>,
    pub business_expense_items: Vec<BusinessExpenseItem>,
}

impl IncomeComposition {
    /// Sum of all capital-gains sub-fields.
    ///
    /// The area counts as "present" iff this sum is strictly positive;
    /// the merger and the recommendation engine both use this exact
    /// field list so the two can never drift apart.
    pub fn capital_gains_total(&self) -> Decimal {
        self.stocks_stcg
            + self.stocks_ltcg
            + self.mutual_funds_stcg
            + self.mutual_funds_ltcg
            + self.fno_gains
            + self.real_estate_gains
            + self.bonds_gains
            + self.gold_gains
            + self.crypto_gains
    }

    /// Sum of all foreign-sourced sub-fields.
    pub fn foreign_assets_total(&self) -> Decimal {
        self.us_stocks_gains + self.rsu_gains + self.foreign_interest_income
    }

    /// Sum of all business and professional income sub-fields.
    pub fn business_income_total(&self) -> Decimal {
        self.intraday_trading_income + self.other_business_income + self.professional_income
    }

    pub fn capital_gains_present(&self) -> bool {
        self.capital_gains_total() > Decimal::ZERO
    }

    pub fn foreign_assets_present(&self) -> bool {
        self.foreign_assets_total() > Decimal::ZERO
    }

    pub fn business_income_present(&self) -> bool {
        self.business_income_total() > Decimal::ZERO
    }
}
