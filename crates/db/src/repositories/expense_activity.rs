//! Expense activity repository.
//!
//! Activities are the status trail of an expense request. The state value is
//! stored and filtered verbatim; no transition rules are applied.

use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    Set,
};

use crate::entities::expense_activity;

/// Field set for creating or overwriting an expense activity.
#[derive(Debug, Clone)]
pub struct ExpenseActivityInput {
    /// Expense request the activity belongs to.
    pub expense_id: i32,
    /// State recorded by this activity.
    pub current_state: String,
    /// Free-form reviewer feedback.
    pub feedback: String,
    /// User who recorded the activity.
    pub created_by: i32,
}

/// Optional filters for listing expense activities.
#[derive(Debug, Clone, Default)]
pub struct ExpenseActivityFilter {
    /// Match on expense request.
    pub expense_id: Option<i32>,
    /// Match on recording user.
    pub created_by: Option<i32>,
    /// Match on recorded state.
    pub current_state: Option<String>,
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

/// Expense activity repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ExpenseActivityRepository {
    db: DatabaseConnection,
}

impl ExpenseActivityRepository {
    /// Creates a new expense activity repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new activity; the store assigns id and created_at.
    pub async fn create(
        &self,
        input: ExpenseActivityInput,
    ) -> Result<expense_activity::Model, DbErr> {
        expense_activity::ActiveModel {
            id: NotSet,
            expense_id: Set(input.expense_id),
            current_state: Set(input.current_state),
            feedback: Set(input.feedback),
            created_by: Set(input.created_by),
            created_at: NotSet,
        }
        .insert(&self.db)
        .await
    }

    /// Finds an activity by id.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<expense_activity::Model>, DbErr> {
        expense_activity::Entity::find_by_id(id).one(&self.db).await
    }

    /// Overwrites an existing activity, leaving `created_at` intact.
    ///
    /// Returns `None` when no activity with the given id exists.
    pub async fn update(
        &self,
        id: i32,
        input: ExpenseActivityInput,
    ) -> Result<Option<expense_activity::Model>, DbErr> {
        let Some(existing) = expense_activity::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: expense_activity::ActiveModel = existing.into();
        model.expense_id = Set(input.expense_id);
        model.current_state = Set(input.current_state);
        model.feedback = Set(input.feedback);
        model.created_by = Set(input.created_by);

        model.update(&self.db).await.map(Some)
    }

    /// Deletes an activity. Returns whether a row was removed.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = expense_activity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Lists activities matching the filter.
    pub async fn list(
        &self,
        filter: ExpenseActivityFilter,
    ) -> Result<Vec<expense_activity::Model>, DbErr> {
        let mut query = expense_activity::Entity::find();

        if let Some(expense_id) = filter.expense_id {
            query = query.filter(expense_activity::Column::ExpenseId.eq(expense_id));
        }
        if let Some(created_by) = filter.created_by {
            query = query.filter(expense_activity::Column::CreatedBy.eq(created_by));
        }
        if let Some(current_state) = filter.current_state {
            query = query.filter(expense_activity::Column::CurrentState.eq(current_state));
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
