//! Paid expense routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{AppState, routes::error_response};
use spesa_db::entities::paid_expense;
use spesa_db::repositories::paid_expense::{
    PaidExpenseFilter, PaidExpenseInput, PaidExpenseRepository,
};
use spesa_shared::AppError;

/// Creates the paid expense routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/paid_expenses", get(list_paid_expenses).post(create_paid_expense))
        .route(
            "/paid_expenses/{id}",
            get(get_paid_expense)
                .put(update_paid_expense)
                .delete(delete_paid_expense),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct PaidExpensePayload {
    id: Option<i32>,
    #[serde(rename = "expenseID")]
    expense_id: i32,
    #[serde(rename = "unitID")]
    unit_id: String,
    category: String,
    amount: Decimal,
}

/// Response body for a paid expense, shared with the pay-expense endpoint.
#[derive(Debug, Serialize)]
pub struct PaidExpenseResponse {
    /// Payment id.
    pub id: i32,
    /// Originating expense request id.
    #[serde(rename = "expenseID")]
    pub expense_id: i32,
    /// Owning unit name.
    #[serde(rename = "unitID")]
    pub unit_id: String,
    /// Expense category name.
    pub category: String,
    /// Paid amount.
    pub amount: Decimal,
    /// Store-assigned creation timestamp.
    #[serde(rename = "createdAt")]
    pub created_at: NaiveDateTime,
}

impl From<paid_expense::Model> for PaidExpenseResponse {
    fn from(m: paid_expense::Model) -> Self {
        Self {
            id: m.id,
            expense_id: m.expense_id,
            unit_id: m.unit_id,
            category: m.category,
            amount: m.amount,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListPaidExpensesQuery {
    expense_id: Option<i32>,
    unit_id: Option<String>,
    category: Option<String>,
    min_amount: Option<Decimal>,
    max_amount: Option<Decimal>,
    year: Option<i32>,
    month: Option<i32>,
    day: Option<i32>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/paid_expenses` - List paid expenses with optional filters.
async fn list_paid_expenses(
    State(state): State<AppState>,
    Query(query): Query<ListPaidExpensesQuery>,
) -> impl IntoResponse {
    let repo = PaidExpenseRepository::new((*state.db).clone());

    let filter = PaidExpenseFilter {
        expense_id: query.expense_id,
        unit_id: query.unit_id,
        category: query.category,
        min_amount: query.min_amount,
        max_amount: query.max_amount,
        year: query.year,
        month: query.month,
        day: query.day,
    };

    match repo.list(filter).await {
        Ok(expenses) => {
            let response: Vec<PaidExpenseResponse> = expenses
                .into_iter()
                .map(PaidExpenseResponse::from)
                .collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list paid expenses");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// POST `/paid_expenses` - Record a new payment.
async fn create_paid_expense(
    State(state): State<AppState>,
    Json(payload): Json<PaidExpensePayload>,
) -> impl IntoResponse {
    let repo = PaidExpenseRepository::new((*state.db).clone());

    let input = PaidExpenseInput {
        expense_id: payload.expense_id,
        unit_id: payload.unit_id,
        category: payload.category,
        amount: payload.amount,
    };

    match repo.create(input).await {
        Ok(created) => {
            info!(paid_expense_id = created.id, "Paid expense created");
            (StatusCode::CREATED, Json(PaidExpenseResponse::from(created))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create paid expense");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// GET `/paid_expenses/{id}` - Get a paid expense by id.
async fn get_paid_expense(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let repo = PaidExpenseRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(Some(found)) => {
            (StatusCode::OK, Json(PaidExpenseResponse::from(found))).into_response()
        }
        Ok(None) => error_response(&AppError::NotFound(format!("Paid expense {id}"))),
        Err(e) => {
            error!(error = %e, paid_expense_id = id, "Failed to get paid expense");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// PUT `/paid_expenses/{id}` - Overwrite a paid expense.
///
/// `created_at` is immutable; the overwrite covers the remaining fields.
async fn update_paid_expense(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<PaidExpensePayload>,
) -> impl IntoResponse {
    if payload.id.unwrap_or(0) == 0 {
        return error_response(&AppError::Validation(
            "Missing or invalid ID in body".into(),
        ));
    }

    let repo = PaidExpenseRepository::new((*state.db).clone());

    let input = PaidExpenseInput {
        expense_id: payload.expense_id,
        unit_id: payload.unit_id,
        category: payload.category,
        amount: payload.amount,
    };

    match repo.update(id, input).await {
        Ok(Some(updated)) => {
            info!(paid_expense_id = id, "Paid expense updated");
            (StatusCode::OK, Json(PaidExpenseResponse::from(updated))).into_response()
        }
        Ok(None) => error_response(&AppError::NotFound(format!("Paid expense {id}"))),
        Err(e) => {
            error!(error = %e, paid_expense_id = id, "Failed to update paid expense");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// DELETE `/paid_expenses/{id}` - Delete a paid expense.
async fn delete_paid_expense(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let repo = PaidExpenseRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(true) => {
            info!(paid_expense_id = id, "Paid expense deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => error_response(&AppError::NotFound(format!("Paid expense {id}"))),
        Err(e) => {
            error!(error = %e, paid_expense_id = id, "Failed to delete paid expense");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}
