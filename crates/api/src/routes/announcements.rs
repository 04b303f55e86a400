//! Announcement routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{AppState, routes::error_response};
use spesa_db::entities::announcement;
use spesa_db::repositories::announcement::{
    AnnouncementFilter, AnnouncementInput, AnnouncementRepository,
};
use spesa_shared::AppError;

/// Creates the announcement routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/announcements",
            get(list_announcements).post(create_announcement),
        )
        .route(
            "/announcements/{id}",
            get(get_announcement)
                .put(update_announcement)
                .delete(delete_announcement),
        )
}

#[derive(Debug, Deserialize)]
struct AnnouncementPayload {
    message: String,
    #[serde(rename = "receiverID")]
    receiver_id: Option<i32>,
    #[serde(rename = "createdBy")]
    created_by: i32,
}

#[derive(Debug, Serialize)]
struct AnnouncementResponse {
    id: i32,
    message: String,
    #[serde(rename = "receiverID")]
    receiver_id: Option<i32>,
    #[serde(rename = "createdBy")]
    created_by: i32,
    #[serde(rename = "createdAt")]
    created_at: NaiveDateTime,
}

impl From<announcement::Model> for AnnouncementResponse {
    fn from(m: announcement::Model) -> Self {
        Self {
            id: m.id,
            message: m.message,
            receiver_id: m.receiver_id,
            created_by: m.created_by,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListAnnouncementsQuery {
    receiver_id: Option<i32>,
    created_by: Option<i32>,
    message: Option<String>,
}

/// GET `/announcements` - List announcements with optional filters.
///
/// The `message` filter is a case-insensitive substring match.
async fn list_announcements(
    State(state): State<AppState>,
    Query(query): Query<ListAnnouncementsQuery>,
) -> impl IntoResponse {
    let repo = AnnouncementRepository::new((*state.db).clone());

    let filter = AnnouncementFilter {
        receiver_id: query.receiver_id,
        created_by: query.created_by,
        message: query.message,
    };

    match repo.list(filter).await {
        Ok(announcements) => {
            let response: Vec<AnnouncementResponse> = announcements
                .into_iter()
                .map(AnnouncementResponse::from)
                .collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list announcements");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// POST `/announcements` - Create a new announcement.
async fn create_announcement(
    State(state): State<AppState>,
    Json(payload): Json<AnnouncementPayload>,
) -> impl IntoResponse {
    let repo = AnnouncementRepository::new((*state.db).clone());

    let input = AnnouncementInput {
        message: payload.message,
        receiver_id: payload.receiver_id,
        created_by: payload.created_by,
    };

    match repo.create(input).await {
        Ok(created) => {
            info!(announcement_id = created.id, "Announcement created");
            (
                StatusCode::CREATED,
                Json(AnnouncementResponse::from(created)),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create announcement");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// GET `/announcements/{id}` - Get an announcement by id.
async fn get_announcement(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let repo = AnnouncementRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(Some(found)) => {
            (StatusCode::OK, Json(AnnouncementResponse::from(found))).into_response()
        }
        Ok(None) => error_response(&AppError::NotFound(format!("Announcement {id}"))),
        Err(e) => {
            error!(error = %e, announcement_id = id, "Failed to get announcement");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// PUT `/announcements/{id}` - Overwrite an announcement.
async fn update_announcement(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<AnnouncementPayload>,
) -> impl IntoResponse {
    let repo = AnnouncementRepository::new((*state.db).clone());

    let input = AnnouncementInput {
        message: payload.message,
        receiver_id: payload.receiver_id,
        created_by: payload.created_by,
    };

    match repo.update(id, input).await {
        Ok(Some(updated)) => {
            info!(announcement_id = id, "Announcement updated");
            (StatusCode::OK, Json(AnnouncementResponse::from(updated))).into_response()
        }
        Ok(None) => error_response(&AppError::NotFound(format!("Announcement {id}"))),
        Err(e) => {
            error!(error = %e, announcement_id = id, "Failed to update announcement");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// DELETE `/announcements/{id}` - Delete an announcement.
async fn delete_announcement(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let repo = AnnouncementRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(true) => {
            info!(announcement_id = id, "Announcement deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => error_response(&AppError::NotFound(format!("Announcement {id}"))),
        Err(e) => {
            error!(error = %e, announcement_id = id, "Failed to delete announcement");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}
