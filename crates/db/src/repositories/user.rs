//! User repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    Set,
};

use crate::entities::users;

/// Field set for creating or overwriting a user.
#[derive(Debug, Clone)]
pub struct UserInput {
    /// Display name.
    pub name: String,
    /// Owning unit name.
    pub unit_id: String,
    /// Role name, stored verbatim.
    pub role_id: String,
    /// Password, stored as received.
    pub password: String,
}

/// Optional filters for listing users.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Match on owning unit.
    pub unit_id: Option<String>,
    /// Match on role.
    pub role_id: Option<String>,
    /// Match on exact name.
    pub name: Option<String>,
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new user and returns the stored row with its assigned id.
    pub async fn create(&self, input: UserInput) -> Result<users::Model, DbErr> {
        users::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            unit_id: Set(input.unit_id),
            role_id: Set(input.role_id),
            password: Set(input.password),
        }
        .insert(&self.db)
        .await
    }

    /// Finds a user by id.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Overwrites every field of an existing user.
    ///
    /// Returns `None` when no user with the given id exists.
    pub async fn update(&self, id: i32, input: UserInput) -> Result<Option<users::Model>, DbErr> {
        let Some(existing) = users::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: users::ActiveModel = existing.into();
        model.name = Set(input.name);
        model.unit_id = Set(input.unit_id);
        model.role_id = Set(input.role_id);
        model.password = Set(input.password);

        model.update(&self.db).await.map(Some)
    }

    /// Deletes a user. Returns whether a row was removed.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = users::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    /// Lists users matching the filter.
    pub async fn list(&self, filter: UserFilter) -> Result<Vec<users::Model>, DbErr> {
        let mut query = users::Entity::find();

        if let Some(unit_id) = filter.unit_id {
            query = query.filter(users::Column::UnitId.eq(unit_id));
        }
        if let Some(role_id) = filter.role_id {
            query = query.filter(users::Column::RoleId.eq(role_id));
        }
        if let Some(name) = filter.name {
            query = query.filter(users::Column::Name.eq(name));
        }

        query.all(&self.db).await
    }
}
