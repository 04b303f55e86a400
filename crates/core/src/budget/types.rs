//! Budget data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The ceiling configured for one unit, expense category, and fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetTerms {
    /// Fiscal year the terms apply to.
    pub year: i32,
    /// Spending limit.
    pub limit: Decimal,
    /// Fractional overage allowed above the limit (0.1 = 10% over).
    pub threshold_ratio: Decimal,
}

/// Outcome of checking recorded spending against budget terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    /// Fiscal year the check was performed for.
    pub year: i32,
    /// Spending limit.
    pub limit: Decimal,
    /// Fractional overage allowed above the limit.
    pub threshold: Decimal,
    /// Sum of recorded payments for the unit/category/year.
    pub spent: Decimal,
    /// Limit minus spent. Negative when the limit is already exceeded.
    pub rest: Decimal,
    /// Hard ceiling: limit plus the allowed overage.
    pub budget_max: Decimal,
}
