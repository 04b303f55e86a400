//! Unit repository.
//!
//! Units are keyed by name. Renames are allowed and take effect through the
//! update operation, so the update runs as a keyed `UPDATE` rather than
//! through an active model.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use crate::entities::unit;

/// Field set for creating or overwriting a unit.
#[derive(Debug, Clone)]
pub struct UnitInput {
    /// Unit name (the key).
    pub name: String,
    /// Managing user id, if any.
    pub manager_id: Option<i32>,
}

/// Optional filters for listing units.
#[derive(Debug, Clone, Default)]
pub struct UnitFilter {
    /// Match on exact name.
    pub name: Option<String>,
    /// Match on manager.
    pub manager_id: Option<i32>,
}

/// Unit repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UnitRepository {
    db: DatabaseConnection,
}

impl UnitRepository {
    /// Creates a new unit repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new unit.
    pub async fn create(&self, input: UnitInput) -> Result<unit::Model, DbErr> {
        unit::ActiveModel {
            name: Set(input.name),
            manager_id: Set(input.manager_id),
        }
        .insert(&self.db)
        .await
    }

    /// Finds a unit by name.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<unit::Model>, DbErr> {
        unit::Entity::find_by_id(name.to_owned()).one(&self.db).await
    }

    /// Overwrites a unit, possibly renaming it.
    ///
    /// Returns `None` when no unit with the given name exists.
    pub async fn update(
        &self,
        name: &str,
        input: UnitInput,
    ) -> Result<Option<unit::Model>, DbErr> {
        if self.find_by_name(name).await?.is_none() {
            return Ok(None);
        }

        unit::Entity::update_many()
            .col_expr(unit::Column::Name, Expr::value(input.name.clone()))
            .col_expr(unit::Column::ManagerId, Expr::value(input.manager_id))
            .filter(unit::Column::Name.eq(name))
            .exec(&self.db)
            .await?;

        self.find_by_name(&input.name).await
    }

    /// Deletes a unit. Returns whether a row was removed.
    pub async fn delete(&self, name: &str) -> Result<bool, DbErr> {
        let result = unit::Entity::delete_by_id(name.to_owned())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Lists units matching the filter.
    pub async fn list(&self, filter: UnitFilter) -> Result<Vec<unit::Model>, DbErr> {
        let mut query = unit::Entity::find();

        if let Some(name) = filter.name {
            query = query.filter(unit::Column::Name.eq(name));
        }
        if let Some(manager_id) = filter.manager_id {
            query = query.filter(unit::Column::ManagerId.eq(manager_id));
        }

        query.all(&self.db).await
    }
}
