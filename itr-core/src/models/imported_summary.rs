use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Income figures surfaced by the document-import collaborator.
///
/// A sparse subset of the [`IncomeComposition`] categories plus the
/// identity fields printed on the source document. Every numeric field
/// defaults to zero, so a summary missing whole sections still merges
/// cleanly. Read-only input to the merger; never mutated.
///
/// [`IncomeComposition`]: super::IncomeComposition
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportedIncomeSummary {
    pub name: String,
    pub pan: String,
    pub assessment_year: String,

    pub salary_income: Decimal,
    pub interest_income: Decimal,
    pub house_property_income: Decimal,

    pub stocks_stcg: Decimal,
    pub stocks_ltcg: Decimal,
    pub mutual_funds_stcg: Decimal,
    pub mutual_funds_ltcg: Decimal,
    pub fno_gains: Decimal,
    pub real_estate_gains: Decimal,
    pub bonds_gains: Decimal,
    pub gold_gains: Decimal,
    pub crypto_gains: Decimal,

    pub us_stocks_gains: Decimal,
    pub rsu_gains: Decimal,
    pub foreign_interest_income: Decimal,

    pub intraday_trading_income: Decimal,
    pub other_business_income: Decimal,
    pub trading_expenses: Decimal,
    pub other_business_expenses: Decimal,
}

impl ImportedIncomeSummary {
    /// Same field list as [`IncomeComposition::capital_gains_total`].
    ///
    /// [`IncomeComposition::capital_gains_total`]: super::IncomeComposition::capital_gains_total
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

    pub fn foreign_assets_total(&self) -> Decimal {
        self.us_stocks_gains + self.rsu_gains + self.foreign_interest_income
    }

    pub fn business_income_total(&self) -> Decimal {
        self.intraday_trading_income + self.other_business_income
    }

    pub fn capital_gains_present(&self) -> bool {
        self.capital_gains_total() > Decimal::ZERO
    }

    pub fn foreign_assets_present(&self) -> bool {
        self.foreign_assets_total() > Decimal::ZERO
    }

    /// Any business activity on the document selects the area, expense
    /// fields included: a summary carrying only trading expenses still
    /// has its business figures copied over.
    pub fn business_income_present(&self) -> bool {
        self.business_income_total() + self.trading_expenses + self.other_business_expenses
            > Decimal::ZERO
    }
}
