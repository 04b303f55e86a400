//! Paid expense repository.

use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    Set,
};

use crate::entities::paid_expense;

/// Field set for creating or overwriting a paid expense.
///
/// `created_at` is assigned by the store on insert and is never part of an
/// overwrite.
#[derive(Debug, Clone)]
pub struct PaidExpenseInput {
    /// Originating expense request id.
    pub expense_id: i32,
    /// Owning unit name.
    pub unit_id: String,
    /// Expense category name.
    pub category: String,
    /// Paid amount.
    pub amount: Decimal,
}

/// Optional filters for listing paid expenses.
#[derive(Debug, Clone, Default)]
pub struct PaidExpenseFilter {
    /// Match on originating request.
    pub expense_id: Option<i32>,
    /// Match on owning unit.
    pub unit_id: Option<String>,
    /// Match on category.
    pub category: Option<String>,
    /// Lower bound on amount (inclusive).
    pub min_amount: Option<Decimal>,
    /// Upper bound on amount (inclusive).
    pub max_amount: Option<Decimal>,
    /// Match on calendar year of `created_at`.
    pub year: Option<i32>,
    /// Match on calendar month of `created_at`.
    pub month: Option<i32>,
    /// Match on calendar day of `created_at`.
    pub day: Option<i32>,
}

fn created_at_part_eq(part: &str, value: i32) -> SimpleExpr {
    Expr::cust_with_values(format!("EXTRACT({part} FROM created_at) = ?"), [value])
}

/// Paid expense repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct PaidExpenseRepository {
    db: DatabaseConnection,
}

impl PaidExpenseRepository {
    /// Creates a new paid expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new paid expense; the store assigns id and created_at.
    pub async fn create(&self, input: PaidExpenseInput) -> Result<paid_expense::Model, DbErr> {
        paid_expense::ActiveModel {
            id: NotSet,
            expense_id: Set(input.expense_id),
            unit_id: Set(input.unit_id),
            category: Set(input.category),
            amount: Set(input.amount),
            created_at: NotSet,
        }
        .insert(&self.db)
        .await
    }

    /// Finds a paid expense by id.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<paid_expense::Model>, DbErr> {
        paid_expense::Entity::find_by_id(id).one(&self.db).await
    }

    /// Overwrites an existing paid expense, leaving `created_at` intact.
    ///
    /// Returns `None` when no paid expense with the given id exists.
    pub async fn update(
        &self,
        id: i32,
        input: PaidExpenseInput,
    ) -> Result<Option<paid_expense::Model>, DbErr> {
        let Some(existing) = paid_expense::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: paid_expense::ActiveModel = existing.into();
        model.expense_id = Set(input.expense_id);
        model.unit_id = Set(input.unit_id);
        model.category = Set(input.category);
        model.amount = Set(input.amount);

        model.update(&self.db).await.map(Some)
    }

    /// Deletes a paid expense. Returns whether a row was removed.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = paid_expense::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    /// Lists paid expenses matching the filter.
    pub async fn list(
        &self,
        filter: PaidExpenseFilter,
    ) -> Result<Vec<paid_expense::Model>, DbErr> {
        let mut query = paid_expense::Entity::find();

        if let Some(expense_id) = filter.expense_id {
            query = query.filter(paid_expense::Column::ExpenseId.eq(expense_id));
        }
        if let Some(unit_id) = filter.unit_id {
            query = query.filter(paid_expense::Column::UnitId.eq(unit_id));
        }
        if let Some(category) = filter.category {
            query = query.filter(paid_expense::Column::Category.eq(category));
        }
        if let Some(min_amount) = filter.min_amount {
            query = query.filter(paid_expense::Column::Amount.gte(min_amount));
        }
        if let Some(max_amount) = filter.max_amount {
            query = query.filter(paid_expense::Column::Amount.lte(max_amount));
        }
        if let Some(year) = filter.year {
            query = query.filter(created_at_part_eq("YEAR", year));
        }
        if let Some(month) = filter.month {
            query = query.filter(created_at_part_eq("MONTH", month));
        }
        if let Some(day) = filter.day {
            query = query.filter(created_at_part_eq("DAY", day));
        }

        query.all(&self.db).await
    }
}

#[cfg(test)]
#[path = "paid_expense_tests.rs"]
mod paid_expense_tests;
