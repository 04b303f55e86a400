//! Expense activity routes.
//!
//! Activities form the status trail of an expense request. The state value
//! travels and is stored verbatim; no transition table is enforced.

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
use spesa_db::entities::expense_activity;
use spesa_db::repositories::expense_activity::{
    ExpenseActivityFilter, ExpenseActivityInput, ExpenseActivityRepository,
};
use spesa_shared::AppError;

/// Creates the expense activity routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/expense_activities",
            get(list_activities).post(create_activity),
        )
        .route(
            "/expense_activities/{id}",
            get(get_activity).put(update_activity).delete(delete_activity),
        )
}

#[derive(Debug, Deserialize)]
struct ExpenseActivityPayload {
    #[serde(rename = "expenseID")]
    expense_id: i32,
    #[serde(rename = "currentState")]
    current_state: String,
    feedback: String,
    #[serde(rename = "createdBy")]
    created_by: i32,
}

#[derive(Debug, Serialize)]
struct ExpenseActivityResponse {
    id: i32,
    #[serde(rename = "expenseID")]
    expense_id: i32,
    #[serde(rename = "currentState")]
    current_state: String,
    feedback: String,
    #[serde(rename = "createdBy")]
    created_by: i32,
    #[serde(rename = "createdAt")]
    created_at: NaiveDateTime,
}

impl From<expense_activity::Model> for ExpenseActivityResponse {
    fn from(m: expense_activity::Model) -> Self {
        Self {
            id: m.id,
            expense_id: m.expense_id,
            current_state: m.current_state,
            feedback: m.feedback,
            created_by: m.created_by,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListActivitiesQuery {
    expense_id: Option<i32>,
    created_by: Option<i32>,
    current_state: Option<String>,
    year: Option<i32>,
    month: Option<i32>,
    day: Option<i32>,
}

/// GET `/expense_activities` - List activities with optional filters.
async fn list_activities(
    State(state): State<AppState>,
    Query(query): Query<ListActivitiesQuery>,
) -> impl IntoResponse {
    let repo = ExpenseActivityRepository::new((*state.db).clone());

    let filter = ExpenseActivityFilter {
        expense_id: query.expense_id,
        created_by: query.created_by,
        current_state: query.current_state,
        year: query.year,
        month: query.month,
        day: query.day,
    };

    match repo.list(filter).await {
        Ok(activities) => {
            let response: Vec<ExpenseActivityResponse> = activities
                .into_iter()
                .map(ExpenseActivityResponse::from)
                .collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list expense activities");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// POST `/expense_activities` - Record a new activity.
async fn create_activity(
    State(state): State<AppState>,
    Json(payload): Json<ExpenseActivityPayload>,
) -> impl IntoResponse {
    let repo = ExpenseActivityRepository::new((*state.db).clone());

    let input = ExpenseActivityInput {
        expense_id: payload.expense_id,
        current_state: payload.current_state,
        feedback: payload.feedback,
        created_by: payload.created_by,
    };

    match repo.create(input).await {
        Ok(created) => {
            info!(expense_activity_id = created.id, "Expense activity created");
            (
                StatusCode::CREATED,
                Json(ExpenseActivityResponse::from(created)),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create expense activity");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// GET `/expense_activities/{id}` - Get an activity by id.
async fn get_activity(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    let repo = ExpenseActivityRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(Some(found)) => {
            (StatusCode::OK, Json(ExpenseActivityResponse::from(found))).into_response()
        }
        Ok(None) => error_response(&AppError::NotFound(format!("Expense activity {id}"))),
        Err(e) => {
            error!(error = %e, expense_activity_id = id, "Failed to get expense activity");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// PUT `/expense_activities/{id}` - Overwrite an activity.
async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ExpenseActivityPayload>,
) -> impl IntoResponse {
    let repo = ExpenseActivityRepository::new((*state.db).clone());

    let input = ExpenseActivityInput {
        expense_id: payload.expense_id,
        current_state: payload.current_state,
        feedback: payload.feedback,
        created_by: payload.created_by,
    };

    match repo.update(id, input).await {
        Ok(Some(updated)) => {
            info!(expense_activity_id = id, "Expense activity updated");
            (StatusCode::OK, Json(ExpenseActivityResponse::from(updated))).into_response()
        }
        Ok(None) => error_response(&AppError::NotFound(format!("Expense activity {id}"))),
        Err(e) => {
            error!(error = %e, expense_activity_id = id, "Failed to update expense activity");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// DELETE `/expense_activities/{id}` - Delete an activity.
async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let repo = ExpenseActivityRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(true) => {
            info!(expense_activity_id = id, "Expense activity deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => error_response(&AppError::NotFound(format!("Expense activity {id}"))),
        Err(e) => {
            error!(error = %e, expense_activity_id = id, "Failed to delete expense activity");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}
