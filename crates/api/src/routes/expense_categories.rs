//! Expense category routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{AppState, routes::error_response};
use spesa_db::repositories::expense_category::ExpenseCategoryRepository;
use spesa_shared::AppError;

/// Creates the expense category routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/expense_categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/expense_categories/{name}",
            get(get_category).put(update_category).delete(delete_category),
        )
}

#[derive(Debug, Serialize, Deserialize)]
struct CategoryBody {
    name: String,
}

/// GET `/expense_categories` - List every category.
async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    let repo = ExpenseCategoryRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(categories) => {
            let response: Vec<CategoryBody> = categories
                .into_iter()
                .map(|c| CategoryBody { name: c.name })
                .collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list expense categories");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// POST `/expense_categories` - Create a new category.
async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CategoryBody>,
) -> impl IntoResponse {
    let repo = ExpenseCategoryRepository::new((*state.db).clone());

    match repo.create(payload.name).await {
        Ok(created) => {
            info!(category = %created.name, "Expense category created");
            (
                StatusCode::CREATED,
                Json(CategoryBody { name: created.name }),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create expense category");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// GET `/expense_categories/{name}` - Get a category by name.
async fn get_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let repo = ExpenseCategoryRepository::new((*state.db).clone());

    match repo.find_by_name(&name).await {
        Ok(Some(found)) => {
            (StatusCode::OK, Json(CategoryBody { name: found.name })).into_response()
        }
        Ok(None) => error_response(&AppError::NotFound(format!("Expense category {name}"))),
        Err(e) => {
            error!(error = %e, category = %name, "Failed to get expense category");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// PUT `/expense_categories/{name}` - Rename a category.
async fn update_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(payload): Json<CategoryBody>,
) -> impl IntoResponse {
    if payload.name.is_empty() {
        return error_response(&AppError::Validation("Missing or invalid name".into()));
    }

    let repo = ExpenseCategoryRepository::new((*state.db).clone());

    match repo.update(&name, payload.name).await {
        Ok(Some(updated)) => {
            info!(category = %name, renamed_to = %updated.name, "Expense category updated");
            (StatusCode::OK, Json(CategoryBody { name: updated.name })).into_response()
        }
        Ok(None) => error_response(&AppError::NotFound(format!("Expense category {name}"))),
        Err(e) => {
            error!(error = %e, category = %name, "Failed to update expense category");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// DELETE `/expense_categories/{name}` - Delete a category.
async fn delete_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let repo = ExpenseCategoryRepository::new((*state.db).clone());

    match repo.delete(&name).await {
        Ok(true) => {
            info!(category = %name, "Expense category deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => error_response(&AppError::NotFound(format!("Expense category {name}"))),
        Err(e) => {
            error!(error = %e, category = %name, "Failed to delete expense category");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}
