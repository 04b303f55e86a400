//! Budget management routes.
//!
//! Budget rows are addressed by their (unit, category, year) triple, which
//! appears as three path segments.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{AppState, routes::error_response};
use spesa_db::entities::budget;
use spesa_db::repositories::budget::{BudgetFilter, BudgetInput, BudgetKey, BudgetRepository};
use spesa_shared::AppError;

/// Creates the budget routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route(
            "/budgets/{unit_id}/{category}/{year}",
            get(get_budget).put(update_budget).delete(delete_budget),
        )
}

#[derive(Debug, Serialize, Deserialize)]
struct BudgetBody {
    #[serde(rename = "unitID")]
    unit_id: String,
    category: String,
    year: i32,
    #[serde(rename = "budgetLimit")]
    budget_limit: Decimal,
    #[serde(rename = "thresholdRatio")]
    threshold_ratio: Decimal,
}

impl From<budget::Model> for BudgetBody {
    fn from(m: budget::Model) -> Self {
        Self {
            unit_id: m.unit_id,
            category: m.expense_category,
            year: m.year,
            budget_limit: m.budget_limit,
            threshold_ratio: m.threshold_ratio,
        }
    }
}

impl From<BudgetBody> for BudgetInput {
    fn from(b: BudgetBody) -> Self {
        Self {
            unit_id: b.unit_id,
            category: b.category,
            year: b.year,
            budget_limit: b.budget_limit,
            threshold_ratio: b.threshold_ratio,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListBudgetsQuery {
    unit_id: Option<String>,
    category: Option<String>,
    year: Option<i32>,
}

/// GET `/budgets` - List budget rows with optional filters.
async fn list_budgets(
    State(state): State<AppState>,
    Query(query): Query<ListBudgetsQuery>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());

    let filter = BudgetFilter {
        unit_id: query.unit_id,
        category: query.category,
        year: query.year,
    };

    match repo.list(filter).await {
        Ok(budgets) => {
            let response: Vec<BudgetBody> = budgets.into_iter().map(BudgetBody::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list budgets");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// POST `/budgets` - Create a budget row.
///
/// The composite primary key keeps the (unit, category, year) triple unique;
/// a duplicate insert surfaces as a store failure.
async fn create_budget(
    State(state): State<AppState>,
    Json(payload): Json<BudgetBody>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());

    match repo.create(payload.into()).await {
        Ok(created) => {
            info!(
                unit = %created.unit_id,
                category = %created.expense_category,
                year = created.year,
                "Budget created"
            );
            (StatusCode::CREATED, Json(BudgetBody::from(created))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create budget");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// GET `/budgets/{unit_id}/{category}/{year}` - Get one budget row.
async fn get_budget(
    State(state): State<AppState>,
    Path((unit_id, category, year)): Path<(String, String, i32)>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());

    let key = BudgetKey {
        unit_id,
        category,
        year,
    };

    match repo.find(&key).await {
        Ok(Some(found)) => (StatusCode::OK, Json(BudgetBody::from(found))).into_response(),
        Ok(None) => error_response(&AppError::NotFound(format!(
            "Budget for {}/{}/{}",
            key.unit_id, key.category, key.year
        ))),
        Err(e) => {
            error!(error = %e, "Failed to get budget");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// PUT `/budgets/{unit_id}/{category}/{year}` - Overwrite a budget row.
///
/// The body may carry a different triple, moving the row to a new key.
async fn update_budget(
    State(state): State<AppState>,
    Path((unit_id, category, year)): Path<(String, String, i32)>,
    Json(payload): Json<BudgetBody>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());

    let key = BudgetKey {
        unit_id,
        category,
        year,
    };

    match repo.update(&key, payload.into()).await {
        Ok(Some(updated)) => {
            info!(
                unit = %key.unit_id,
                category = %key.category,
                year = key.year,
                "Budget updated"
            );
            (StatusCode::OK, Json(BudgetBody::from(updated))).into_response()
        }
        Ok(None) => error_response(&AppError::NotFound(format!(
            "Budget for {}/{}/{}",
            key.unit_id, key.category, key.year
        ))),
        Err(e) => {
            error!(error = %e, "Failed to update budget");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// DELETE `/budgets/{unit_id}/{category}/{year}` - Delete a budget row.
async fn delete_budget(
    State(state): State<AppState>,
    Path((unit_id, category, year)): Path<(String, String, i32)>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());

    let key = BudgetKey {
        unit_id,
        category,
        year,
    };

    match repo.delete(&key).await {
        Ok(true) => {
            info!(
                unit = %key.unit_id,
                category = %key.category,
                year = key.year,
                "Budget deleted"
            );
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => error_response(&AppError::NotFound(format!(
            "Budget for {}/{}/{}",
            key.unit_id, key.category, key.year
        ))),
        Err(e) => {
            error!(error = %e, "Failed to delete budget");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}
