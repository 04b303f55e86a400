//! Budget evaluation for the pay-expense operation.
//!
//! Given a payment identifier, the evaluation joins the payment, its
//! originating expense request, the matching budget row, and the aggregate
//! of prior payments, then derives the remaining budget and the
//! threshold-adjusted maximum. The sequence is read-only: nothing is
//! written, and the three entities are never mutated.
//!
//! The four reads run without a wrapping transaction, so two concurrent
//! evaluations against the same (unit, category, year) can observe spent
//! totals that exclude each other.

use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, QueryFilter,
    QuerySelect,
};

use crate::entities::{budget, expense_request, paid_expense};
use spesa_core::budget::{BudgetService, BudgetStatus, BudgetTerms};
use spesa_core::fiscal;
use spesa_shared::AppError;

/// Error types for payment evaluation.
///
/// `PaymentNotFound` is a caller mistake (the addressed payment does not
/// exist). The two missing-dependency variants are data-consistency gaps:
/// the payment exists but references records the caller cannot supply
/// through this operation.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    /// No paid expense exists with the given id.
    #[error("Paid expense not found: {0}")]
    PaymentNotFound(i32),

    /// The expense request the payment references does not exist.
    #[error("Expense request {0} referenced by the payment does not exist")]
    RequestMissing(i32),

    /// No budget row is configured for the payment's unit, category, and year.
    #[error("No budget configured for unit {unit_id}, category {category}, year {year}")]
    BudgetMissing {
        /// Unit name of the payment.
        unit_id: String,
        /// Category name of the payment.
        category: String,
        /// Fiscal year derived from the originating request.
        year: i32,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<EvaluationError> for AppError {
    fn from(err: EvaluationError) -> Self {
        match err {
            EvaluationError::PaymentNotFound(id) => Self::NotFound(format!("Paid expense {id}")),
            e @ (EvaluationError::RequestMissing(_) | EvaluationError::BudgetMissing { .. }) => {
                Self::DependencyMissing(e.to_string())
            }
            EvaluationError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Result of evaluating a payment against its budget.
#[derive(Debug, Clone)]
pub struct PaymentEvaluation {
    /// The payment that was evaluated.
    pub paid_expense: paid_expense::Model,
    /// Budget status for the payment's unit, category, and year.
    pub status: BudgetStatus,
}

#[derive(FromQueryResult)]
struct SpentRow {
    spent: Option<Decimal>,
}

/// Repository composing the pay-expense read sequence.
#[derive(Debug, Clone)]
pub struct EvaluationRepository {
    db: DatabaseConnection,
}

impl EvaluationRepository {
    /// Creates a new evaluation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Evaluates a payment against the budget of its unit, category, and
    /// fiscal year.
    ///
    /// The fiscal year is the calendar year of the *originating request's*
    /// creation timestamp, while the spent aggregate buckets payments by
    /// their *own* creation year. The two can diverge for a payment
    /// recorded in a different calendar year than its request; the
    /// asymmetry is kept as-is.
    pub async fn evaluate(&self, payment_id: i32) -> Result<PaymentEvaluation, EvaluationError> {
        let paid = paid_expense::Entity::find_by_id(payment_id)
            .one(&self.db)
            .await?
            .ok_or(EvaluationError::PaymentNotFound(payment_id))?;

        let request = expense_request::Entity::find_by_id(paid.expense_id)
            .one(&self.db)
            .await?
            .ok_or(EvaluationError::RequestMissing(paid.expense_id))?;

        let year = fiscal::year_of(request.created_at);

        let budget_row =
            budget::Entity::find_by_id((paid.unit_id.clone(), paid.category.clone(), year))
                .one(&self.db)
                .await?
                .ok_or_else(|| EvaluationError::BudgetMissing {
                    unit_id: paid.unit_id.clone(),
                    category: paid.category.clone(),
                    year,
                })?;

        let spent = self.sum_paid(&paid.unit_id, &paid.category, year).await?;

        let terms = BudgetTerms {
            year,
            limit: budget_row.budget_limit,
            threshold_ratio: budget_row.threshold_ratio,
        };
        let status = BudgetService::assess(&terms, spent);

        Ok(PaymentEvaluation {
            paid_expense: paid,
            status,
        })
    }

    /// Sums recorded payments for a unit and category whose own creation
    /// timestamp falls in the given year. The payment under evaluation is
    /// part of the sum when its timestamp matches.
    async fn sum_paid(&self, unit_id: &str, category: &str, year: i32) -> Result<Decimal, DbErr> {
        let row = paid_expense::Entity::find()
            .select_only()
            .column_as(paid_expense::Column::Amount.sum(), "spent")
            .filter(paid_expense::Column::UnitId.eq(unit_id))
            .filter(paid_expense::Column::Category.eq(category))
            .filter(Expr::cust_with_values(
                "EXTRACT(YEAR FROM created_at) = ?",
                [year],
            ))
            .into_model::<SpentRow>()
            .one(&self.db)
            .await?;

        Ok(row.and_then(|r| r.spent).unwrap_or(Decimal::ZERO))
    }
}

#[cfg(test)]
#[path = "evaluation_tests.rs"]
mod evaluation_tests;
