//! Expense category repository.
//!
//! The category table is a bare name list. Like units, categories are keyed
//! by name and may be renamed in place.

use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};

use crate::entities::expense_category;

/// Expense category repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ExpenseCategoryRepository {
    db: DatabaseConnection,
}

impl ExpenseCategoryRepository {
    /// Creates a new expense category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new category.
    pub async fn create(&self, name: String) -> Result<expense_category::Model, DbErr> {
        expense_category::ActiveModel { name: Set(name) }
            .insert(&self.db)
            .await
    }

    /// Finds a category by name.
    pub async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<expense_category::Model>, DbErr> {
        expense_category::Entity::find_by_id(name.to_owned())
            .one(&self.db)
            .await
    }

    /// Renames a category. Returns `None` when the category does not exist.
    pub async fn update(
        &self,
        name: &str,
        new_name: String,
    ) -> Result<Option<expense_category::Model>, DbErr> {
        if self.find_by_name(name).await?.is_none() {
            return Ok(None);
        }

        expense_category::Entity::update_many()
            .col_expr(expense_category::Column::Name, Expr::value(new_name.clone()))
            .filter(expense_category::Column::Name.eq(name))
            .exec(&self.db)
            .await?;

        self.find_by_name(&new_name).await
    }

    /// Deletes a category. Returns whether a row was removed.
    pub async fn delete(&self, name: &str) -> Result<bool, DbErr> {
        let result = expense_category::Entity::delete_by_id(name.to_owned())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Lists every category.
    pub async fn list(&self) -> Result<Vec<expense_category::Model>, DbErr> {
        expense_category::Entity::find().all(&self.db).await
    }
}
