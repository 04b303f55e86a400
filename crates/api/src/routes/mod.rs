//! API route definitions.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;

use crate::AppState;
use spesa_shared::AppError;

pub mod announcements;
pub mod budgets;
pub mod expense_activities;
pub mod expense_categories;
pub mod expense_requests;
pub mod health;
pub mod paid_expenses;
pub mod units;
pub mod users;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(users::routes())
        .merge(units::routes())
        .merge(expense_categories::routes())
        .merge(expense_requests::routes())
        .merge(expense_activities::routes())
        .merge(paid_expenses::routes())
        .merge(budgets::routes())
        .merge(announcements::routes())
}

/// Renders an `AppError` as a JSON error response.
pub(crate) fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}
