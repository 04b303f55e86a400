//! Budget service for the pay-expense check.

use rust_decimal::Decimal;

use super::types::{BudgetStatus, BudgetTerms};

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Checks recorded spending against budget terms.
    ///
    /// Derives the remaining budget and the hard ceiling:
    ///
    /// - `rest = limit - spent` (negative once the limit is exceeded)
    /// - `budget_max = limit + threshold_ratio * limit`
    ///
    /// Decimal arithmetic throughout; no rounding beyond input precision.
    #[must_use]
    pub fn assess(terms: &BudgetTerms, spent: Decimal) -> BudgetStatus {
        let rest = terms.limit - spent;
        let budget_max = terms.limit + terms.threshold_ratio * terms.limit;

        BudgetStatus {
            year: terms.year,
            limit: terms.limit,
            threshold: terms.threshold_ratio,
            spent,
            rest,
            budget_max,
        }
    }
}
