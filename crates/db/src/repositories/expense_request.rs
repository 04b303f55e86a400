//! Expense request repository.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    Set,
};

use crate::entities::expense_request;

/// Field set for creating or overwriting an expense request.
///
/// `created_at` is assigned by the store on insert and is never part of an
/// overwrite.
#[derive(Debug, Clone)]
pub struct ExpenseRequestInput {
    /// Requesting user id.
    pub user_id: i32,
    /// Owning unit name.
    pub unit_id: String,
    /// Requested amount.
    pub amount: Decimal,
    /// Expense category name.
    pub category: String,
    /// Whether the request has been finalized.
    pub is_finalized: bool,
}

/// Optional filters for listing expense requests.
#[derive(Debug, Clone, Default)]
pub struct ExpenseRequestFilter {
    /// Match on requesting user.
    pub user_id: Option<i32>,
    /// Match on owning unit.
    pub unit_id: Option<String>,
    /// Match on exact amount.
    pub amount: Option<Decimal>,
    /// Match on category.
    pub category: Option<String>,
    /// Match on finalized flag.
    pub is_finalized: Option<bool>,
}

/// Expense request repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ExpenseRequestRepository {
    db: DatabaseConnection,
}

impl ExpenseRequestRepository {
    /// Creates a new expense request repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new expense request; the store assigns id and created_at.
    pub async fn create(
        &self,
        input: ExpenseRequestInput,
    ) -> Result<expense_request::Model, DbErr> {
        expense_request::ActiveModel {
            id: NotSet,
            user_id: Set(input.user_id),
            unit_id: Set(input.unit_id),
            amount: Set(input.amount),
            category: Set(input.category),
            created_at: NotSet,
            is_finalized: Set(input.is_finalized),
        }
        .insert(&self.db)
        .await
    }

    /// Finds an expense request by id.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<expense_request::Model>, DbErr> {
        expense_request::Entity::find_by_id(id).one(&self.db).await
    }

    /// Overwrites an existing expense request, leaving `created_at` intact.
    ///
    /// Returns `None` when no request with the given id exists.
    pub async fn update(
        &self,
        id: i32,
        input: ExpenseRequestInput,
    ) -> Result<Option<expense_request::Model>, DbErr> {
        let Some(existing) = expense_request::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: expense_request::ActiveModel = existing.into();
        model.user_id = Set(input.user_id);
        model.unit_id = Set(input.unit_id);
        model.amount = Set(input.amount);
        model.category = Set(input.category);
        model.is_finalized = Set(input.is_finalized);

        model.update(&self.db).await.map(Some)
    }

    /// Deletes an expense request. Returns whether a row was removed.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = expense_request::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Lists expense requests matching the filter.
    pub async fn list(
        &self,
        filter: ExpenseRequestFilter,
    ) -> Result<Vec<expense_request::Model>, DbErr> {
        let mut query = expense_request::Entity::find();

        if let Some(user_id) = filter.user_id {
            query = query.filter(expense_request::Column::UserId.eq(user_id));
        }
        if let Some(unit_id) = filter.unit_id {
            query = query.filter(expense_request::Column::UnitId.eq(unit_id));
        }
        if let Some(amount) = filter.amount {
            query = query.filter(expense_request::Column::Amount.eq(amount));
        }
        if let Some(category) = filter.category {
            query = query.filter(expense_request::Column::Category.eq(category));
        }
        if let Some(is_finalized) = filter.is_finalized {
            query = query.filter(expense_request::Column::IsFinalized.eq(is_finalized));
        }

        query.all(&self.db).await
    }
}
