//! Income merger: combines manually entered income with an imported
//! summary document without double counting.
//!
//! Exactly three income areas can legitimately arrive from either
//! source — capital gains, foreign assets, and business income. An area
//! counts as import-sourced when the sum of its sub-fields in the
//! summary is strictly positive: the document reports at sub-field
//! granularity while the user-facing toggle is per area, so any one
//! non-zero sub-field marks the whole area.
//!
//! The merger is total: absent numeric fields are normalized to zero at
//! deserialization, so any well-formed pair of inputs merges without
//! error. Re-running a merge with unchanged inputs is a no-op: each
//! derived line-item category materializes at most one entry, which
//! makes the merge safe to call on every calculation request.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{
    BusinessExpenseItem, BusinessIncomeItem, ImportedIncomeSummary, IncomeComposition,
};

/// Category labels for merger-derived line items. Fixed so a re-merge
/// can recognize the entry it materialized earlier.
pub const INTRADAY_TRADING_CATEGORY: &str = "Intraday Trading";
pub const OTHER_BUSINESS_CATEGORY: &str = "Other Business";
pub const TRADING_EXPENSES_CATEGORY: &str = "Trading Expenses";
pub const OTHER_BUSINESS_EXPENSES_CATEGORY: &str = "Other Business Expenses";

/// Which areas the merge found in the imported summary.
///
/// A `true` flag means the area's toggle was forced on and the matching
/// manual-entry sub-form should be hidden; acting on that is the UI's
/// job, not the merger's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    pub capital_gains_imported: bool,
    pub foreign_assets_imported: bool,
    pub business_imported: bool,
}

/// Merge an imported summary into the composition accumulated so far.
///
/// Import-sourced areas have their toggles forced on and their summary
/// amounts written into the matching sub-fields (assignment, not
/// addition — assigning is what keeps a re-merge from double counting).
/// Business income additionally contributes derived line items, one per
/// non-zero source field, appended after whatever the user has already
/// built manually.
pub fn merge_import(
    composition: &mut IncomeComposition,
    summary: &ImportedIncomeSummary,
    merged_at: DateTime<Utc>,
) -> MergeOutcome {
    let outcome = MergeOutcome {
        capital_gains_imported: summary.capital_gains_present(),
        foreign_assets_imported: summary.foreign_assets_present(),
        business_imported: summary.business_income_present(),
    };

    if outcome.capital_gains_imported {
        composition.has_capital_gains = true;
        assign_nonzero(&mut composition.stocks_stcg, summary.stocks_stcg);
        assign_nonzero(&mut composition.stocks_ltcg, summary.stocks_ltcg);
        assign_nonzero(&mut composition.mutual_funds_stcg, summary.mutual_funds_stcg);
        assign_nonzero(&mut composition.mutual_funds_ltcg, summary.mutual_funds_ltcg);
        assign_nonzero(&mut composition.fno_gains, summary.fno_gains);
        assign_nonzero(&mut composition.real_estate_gains, summary.real_estate_gains);
        assign_nonzero(&mut composition.bonds_gains, summary.bonds_gains);
        assign_nonzero(&mut composition.gold_gains, summary.gold_gains);
        assign_nonzero(&mut composition.crypto_gains, summary.crypto_gains);
    }

    if outcome.foreign_assets_imported {
        composition.has_foreign_assets = true;
        assign_nonzero(&mut composition.us_stocks_gains, summary.us_stocks_gains);
        assign_nonzero(&mut composition.rsu_gains, summary.rsu_gains);
        assign_nonzero(
            &mut composition.foreign_interest_income,
            summary.foreign_interest_income,
        );
    }

    if outcome.business_imported {
        composition.has_business_income = true;
        assign_nonzero(
            &mut composition.intraday_trading_income,
            summary.intraday_trading_income,
        );
        assign_nonzero(
            &mut composition.other_business_income,
            summary.other_business_income,
        );
        assign_nonzero(&mut composition.trading_expenses, summary.trading_expenses);
        assign_nonzero(
            &mut composition.other_business_expenses,
            summary.other_business_expenses,
        );
    }

    // Either the manual toggle or import-derived presence is sufficient
    // for the business filing path.
    refresh_business_flags(composition, merged_at);

    debug!(
        capital_gains = outcome.capital_gains_imported,
        foreign_assets = outcome.foreign_assets_imported,
        business = outcome.business_imported,
        "merged imported income summary"
    );

    outcome
}

/// Re-derive the business-income flag and the derived line items from
/// the composition's own numeric fields.
///
/// The controller runs this before every generation request, so a stale
/// or manually unset business toggle can never disagree with non-zero
/// business amounts elsewhere in the composition.
pub fn refresh_business_flags(
    composition: &mut IncomeComposition,
    derived_at: DateTime<Utc>,
) {
    composition.has_business_income =
        composition.has_business_income || composition.business_income_present();

    let mut income_items = std::mem::take(&mut composition.business_income_items);
    push_income_item(
        &mut income_items,
        INTRADAY_TRADING_CATEGORY,
        "Income from intraday equity trading",
        composition.intraday_trading_income,
    );
    push_income_item(
        &mut income_items,
        OTHER_BUSINESS_CATEGORY,
        "Other business income",
        composition.other_business_income,
    );
    composition.business_income_items = income_items;

    let mut expense_items = std::mem::take(&mut composition.business_expense_items);
    push_expense_item(
        &mut expense_items,
        TRADING_EXPENSES_CATEGORY,
        "Expenses incurred on trading activity",
        composition.trading_expenses,
        derived_at,
    );
    push_expense_item(
        &mut expense_items,
        OTHER_BUSINESS_EXPENSES_CATEGORY,
        "Other business expenses",
        composition.other_business_expenses,
        derived_at,
    );
    composition.business_expense_items = expense_items;
}

fn assign_nonzero(
    field: &mut Decimal,
    imported: Decimal,
) {
    if imported != Decimal::ZERO {
        *field = imported;
    }
}

/// Insert or update the one derived income item for `category`.
///
/// Identity is the category alone: when a refreshed summary carries a
/// different figure the existing entry takes the new amount rather than
/// gaining a stale sibling.
fn push_income_item(
    items: &mut Vec<BusinessIncomeItem>,
    category: &str,
    description: &str,
    amount: Decimal,
) {
    if amount <= Decimal::ZERO {
        return;
    }
    match items.iter_mut().find(|item| item.category == category) {
        Some(existing) => existing.amount = amount,
        None => items.push(BusinessIncomeItem {
            category: category.to_string(),
            description: description.to_string(),
            amount,
        }),
    }
}

/// Insert or update the one derived expense item for `category`.
///
/// Same category-keyed identity as [`push_income_item`]. Updating an
/// existing entry keeps its original `incurred_on`: the derivation
/// timestamp is bookkeeping, not part of the identity.
fn push_expense_item(
    items: &mut Vec<BusinessExpenseItem>,
    category: &str,
    description: &str,
    amount: Decimal,
    derived_at: DateTime<Utc>,
) {
    if amount <= Decimal::ZERO {
        return;
    }
    match items.iter_mut().find(|item| item.category == category) {
        Some(existing) => existing.amount = amount,
        None => items.push(BusinessExpenseItem {
            category: category.to_string(),
            description: description.to_string(),
            amount,
            is_capital_expense: false,
            incurred_on: derived_at,
        }),
    }
}
