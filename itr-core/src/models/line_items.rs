use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One business income line item.
///
/// Built manually by the user during tax-data entry, or derived by the
/// income merger from an imported summary (one item per non-zero
/// source field).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessIncomeItem {
    /// Fixed category label, e.g. "Intraday Trading".
    pub category: String,
    pub description: String,
    pub amount: Decimal,
}

/// One business expense line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessExpenseItem {
    pub category: String,
    pub description: String,
    pub amount: Decimal,
    /// Always `false` for merger-derived entries.
    pub is_capital_expense: bool,
    /// Transaction date. Imported documents carry no date, so derived
    /// entries use the merge timestamp.
    pub incurred_on: DateTime<Utc>,
}
