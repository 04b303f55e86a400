//! Announcement repository.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    Set,
};

use crate::entities::announcement;

/// Field set for creating or overwriting an announcement.
#[derive(Debug, Clone)]
pub struct AnnouncementInput {
    /// Announcement text.
    pub message: String,
    /// Receiving user, if addressed to one.
    pub receiver_id: Option<i32>,
    /// Authoring user.
    pub created_by: i32,
}

/// Optional filters for listing announcements.
#[derive(Debug, Clone, Default)]
pub struct AnnouncementFilter {
    /// Match on receiving user.
    pub receiver_id: Option<i32>,
    /// Match on authoring user.
    pub created_by: Option<i32>,
    /// Case-insensitive substring match on the message text.
    pub message: Option<String>,
}

/// Announcement repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AnnouncementRepository {
    db: DatabaseConnection,
}

impl AnnouncementRepository {
    /// Creates a new announcement repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new announcement; the store assigns id and created_at.
    pub async fn create(&self, input: AnnouncementInput) -> Result<announcement::Model, DbErr> {
        announcement::ActiveModel {
            id: NotSet,
            message: Set(input.message),
            receiver_id: Set(input.receiver_id),
            created_by: Set(input.created_by),
            created_at: NotSet,
        }
        .insert(&self.db)
        .await
    }

    /// Finds an announcement by id.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<announcement::Model>, DbErr> {
        announcement::Entity::find_by_id(id).one(&self.db).await
    }

    /// Overwrites an existing announcement, leaving `created_at` intact.
    ///
    /// Returns `None` when no announcement with the given id exists.
    pub async fn update(
        &self,
        id: i32,
        input: AnnouncementInput,
    ) -> Result<Option<announcement::Model>, DbErr> {
        let Some(existing) = announcement::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: announcement::ActiveModel = existing.into();
        model.message = Set(input.message);
        model.receiver_id = Set(input.receiver_id);
        model.created_by = Set(input.created_by);

        model.update(&self.db).await.map(Some)
    }

    /// Deletes an announcement. Returns whether a row was removed.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = announcement::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    /// Lists announcements matching the filter.
    pub async fn list(
        &self,
        filter: AnnouncementFilter,
    ) -> Result<Vec<announcement::Model>, DbErr> {
        let mut query = announcement::Entity::find();

        if let Some(receiver_id) = filter.receiver_id {
            query = query.filter(announcement::Column::ReceiverId.eq(receiver_id));
        }
        if let Some(created_by) = filter.created_by {
            query = query.filter(announcement::Column::CreatedBy.eq(created_by));
        }
        if let Some(message) = filter.message {
            query = query.filter(Expr::cust_with_values(
                "message ILIKE ?",
                [format!("%{message}%")],
            ));
        }

        query.all(&self.db).await
    }
}
