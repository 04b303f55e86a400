//! Budget repository.
//!
//! Budget rows are keyed by the (unit, category, year) triple. The update
//! operation may move a row to a different triple, so it runs as a keyed
//! `UPDATE` rather than through an active model.

use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use crate::entities::budget;

/// The composite key addressing one budget row.
#[derive(Debug, Clone)]
pub struct BudgetKey {
    /// Unit name.
    pub unit_id: String,
    /// Expense category name.
    pub category: String,
    /// Fiscal year.
    pub year: i32,
}

/// Field set for creating or overwriting a budget.
#[derive(Debug, Clone)]
pub struct BudgetInput {
    /// Unit name.
    pub unit_id: String,
    /// Expense category name.
    pub category: String,
    /// Fiscal year.
    pub year: i32,
    /// Spending limit.
    pub budget_limit: Decimal,
    /// Fractional overage allowed above the limit.
    pub threshold_ratio: Decimal,
}

/// Optional filters for listing budgets.
#[derive(Debug, Clone, Default)]
pub struct BudgetFilter {
    /// Match on unit.
    pub unit_id: Option<String>,
    /// Match on category.
    pub category: Option<String>,
    /// Match on year.
    pub year: Option<i32>,
}

/// Budget repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new budget row.
    ///
    /// The primary key constraint guarantees at most one row per
    /// (unit, category, year); inserting a duplicate triple fails.
    pub async fn create(&self, input: BudgetInput) -> Result<budget::Model, DbErr> {
        budget::ActiveModel {
            unit_id: Set(input.unit_id),
            expense_category: Set(input.category),
            year: Set(input.year),
            budget_limit: Set(input.budget_limit),
            threshold_ratio: Set(input.threshold_ratio),
        }
        .insert(&self.db)
        .await
    }

    /// Finds the budget row for a (unit, category, year) triple.
    pub async fn find(&self, key: &BudgetKey) -> Result<Option<budget::Model>, DbErr> {
        budget::Entity::find_by_id((key.unit_id.clone(), key.category.clone(), key.year))
            .one(&self.db)
            .await
    }

    /// Overwrites a budget row, possibly moving it to a different triple.
    ///
    /// Returns `None` when no row exists at the addressed triple.
    pub async fn update(
        &self,
        key: &BudgetKey,
        input: BudgetInput,
    ) -> Result<Option<budget::Model>, DbErr> {
        if self.find(key).await?.is_none() {
            return Ok(None);
        }

        budget::Entity::update_many()
            .col_expr(budget::Column::UnitId, Expr::value(input.unit_id.clone()))
            .col_expr(
                budget::Column::ExpenseCategory,
                Expr::value(input.category.clone()),
            )
            .col_expr(budget::Column::Year, Expr::value(input.year))
            .col_expr(budget::Column::BudgetLimit, Expr::value(input.budget_limit))
            .col_expr(
                budget::Column::ThresholdRatio,
                Expr::value(input.threshold_ratio),
            )
            .filter(budget::Column::UnitId.eq(key.unit_id.clone()))
            .filter(budget::Column::ExpenseCategory.eq(key.category.clone()))
            .filter(budget::Column::Year.eq(key.year))
            .exec(&self.db)
            .await?;

        self.find(&BudgetKey {
            unit_id: input.unit_id,
            category: input.category,
            year: input.year,
        })
        .await
    }

    /// Deletes a budget row. Returns whether a row was removed.
    pub async fn delete(&self, key: &BudgetKey) -> Result<bool, DbErr> {
        let result =
            budget::Entity::delete_by_id((key.unit_id.clone(), key.category.clone(), key.year))
                .exec(&self.db)
                .await?;
        Ok(result.rows_affected > 0)
    }

    /// Lists budget rows matching the filter.
    pub async fn list(&self, filter: BudgetFilter) -> Result<Vec<budget::Model>, DbErr> {
        let mut query = budget::Entity::find();

        if let Some(unit_id) = filter.unit_id {
            query = query.filter(budget::Column::UnitId.eq(unit_id));
        }
        if let Some(category) = filter.category {
            query = query.filter(budget::Column::ExpenseCategory.eq(category));
        }
        if let Some(year) = filter.year {
            query = query.filter(budget::Column::Year.eq(year));
        }

        query.all(&self.db).await
    }
}
