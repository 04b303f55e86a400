//! Expense request routes, including the pay-expense evaluation endpoint.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::routes::paid_expenses::PaidExpenseResponse;
use crate::{AppState, routes::error_response};
use spesa_core::budget::BudgetStatus;
use spesa_db::entities::expense_request;
use spesa_db::repositories::evaluation::EvaluationRepository;
use spesa_db::repositories::expense_request::{
    ExpenseRequestFilter, ExpenseRequestInput, ExpenseRequestRepository,
};
use spesa_shared::AppError;

/// Creates the expense request routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/expense_requests",
            get(list_expense_requests).post(create_expense_request),
        )
        .route(
            "/expense_requests/{id}",
            get(get_expense_request)
                .put(update_expense_request)
                .delete(delete_expense_request),
        )
        .route("/expense_requests/{id}/pay", post(pay_expense))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ExpenseRequestPayload {
    #[serde(rename = "userID")]
    user_id: i32,
    #[serde(rename = "unitID")]
    unit_id: String,
    amount: Decimal,
    category: String,
    #[serde(rename = "isFinalized", default)]
    is_finalized: bool,
}

#[derive(Debug, Serialize)]
struct ExpenseRequestResponse {
    id: i32,
    #[serde(rename = "userID")]
    user_id: i32,
    #[serde(rename = "unitID")]
    unit_id: String,
    amount: Decimal,
    category: String,
    #[serde(rename = "createdAt")]
    created_at: NaiveDateTime,
    #[serde(rename = "isFinalized")]
    is_finalized: bool,
}

impl From<expense_request::Model> for ExpenseRequestResponse {
    fn from(m: expense_request::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            unit_id: m.unit_id,
            amount: m.amount,
            category: m.category,
            created_at: m.created_at,
            is_finalized: m.is_finalized,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListExpenseRequestsQuery {
    user_id: Option<i32>,
    unit_id: Option<String>,
    amount: Option<Decimal>,
    category: Option<String>,
    is_finalized: Option<bool>,
}

/// Response body for the pay-expense evaluation.
#[derive(Debug, Serialize)]
struct PayExpenseResponse {
    #[serde(rename = "paidExpense")]
    paid_expense: PaidExpenseResponse,
    budget: BudgetStatus,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/expense_requests` - List expense requests with optional filters.
async fn list_expense_requests(
    State(state): State<AppState>,
    Query(query): Query<ListExpenseRequestsQuery>,
) -> impl IntoResponse {
    let repo = ExpenseRequestRepository::new((*state.db).clone());

    let filter = ExpenseRequestFilter {
        user_id: query.user_id,
        unit_id: query.unit_id,
        amount: query.amount,
        category: query.category,
        is_finalized: query.is_finalized,
    };

    match repo.list(filter).await {
        Ok(requests) => {
            let response: Vec<ExpenseRequestResponse> = requests
                .into_iter()
                .map(ExpenseRequestResponse::from)
                .collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list expense requests");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// POST `/expense_requests` - Create a new expense request.
async fn create_expense_request(
    State(state): State<AppState>,
    Json(payload): Json<ExpenseRequestPayload>,
) -> impl IntoResponse {
    let repo = ExpenseRequestRepository::new((*state.db).clone());

    let input = ExpenseRequestInput {
        user_id: payload.user_id,
        unit_id: payload.unit_id,
        amount: payload.amount,
        category: payload.category,
        is_finalized: payload.is_finalized,
    };

    match repo.create(input).await {
        Ok(created) => {
            info!(expense_request_id = created.id, "Expense request created");
            (
                StatusCode::CREATED,
                Json(ExpenseRequestResponse::from(created)),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create expense request");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// GET `/expense_requests/{id}` - Get an expense request by id.
async fn get_expense_request(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let repo = ExpenseRequestRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(Some(found)) => {
            (StatusCode::OK, Json(ExpenseRequestResponse::from(found))).into_response()
        }
        Ok(None) => error_response(&AppError::NotFound(format!("Expense request {id}"))),
        Err(e) => {
            error!(error = %e, expense_request_id = id, "Failed to get expense request");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// PUT `/expense_requests/{id}` - Overwrite an expense request.
async fn update_expense_request(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ExpenseRequestPayload>,
) -> impl IntoResponse {
    let repo = ExpenseRequestRepository::new((*state.db).clone());

    let input = ExpenseRequestInput {
        user_id: payload.user_id,
        unit_id: payload.unit_id,
        amount: payload.amount,
        category: payload.category,
        is_finalized: payload.is_finalized,
    };

    match repo.update(id, input).await {
        Ok(Some(updated)) => {
            info!(expense_request_id = id, "Expense request updated");
            (StatusCode::OK, Json(ExpenseRequestResponse::from(updated))).into_response()
        }
        Ok(None) => error_response(&AppError::NotFound(format!("Expense request {id}"))),
        Err(e) => {
            error!(error = %e, expense_request_id = id, "Failed to update expense request");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// DELETE `/expense_requests/{id}` - Delete an expense request.
async fn delete_expense_request(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let repo = ExpenseRequestRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(true) => {
            info!(expense_request_id = id, "Expense request deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => error_response(&AppError::NotFound(format!("Expense request {id}"))),
        Err(e) => {
            error!(error = %e, expense_request_id = id, "Failed to delete expense request");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// POST `/expense_requests/{id}/pay` - Evaluate a payment against its budget.
///
/// Despite the path, `{id}` addresses a *paid expense*, not an expense
/// request; the route is kept as deployed clients call it. The operation is
/// a read-only projection: it loads the payment, derives the fiscal year
/// from the originating request, looks up the matching budget row, sums
/// recorded payments for that unit/category/year, and reports the remaining
/// budget and threshold-adjusted maximum. No request body is consumed and
/// nothing is written.
async fn pay_expense(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    let repo = EvaluationRepository::new((*state.db).clone());

    match repo.evaluate(id).await {
        Ok(result) => {
            let response = PayExpenseResponse {
                paid_expense: PaidExpenseResponse::from(result.paid_expense),
                budget: result.status,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!(error = %e, paid_expense_id = id, "Failed to evaluate payment");
            error_response(&AppError::from(e))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{NaiveDate, NaiveDateTime};
    use http_body_util::BodyExt;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, Value};
    use std::collections::BTreeMap;
    use tower::ServiceExt;

    use crate::{AppState, create_router};
    use spesa_db::entities::{budget, expense_request, paid_expense};

    fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn paid() -> paid_expense::Model {
        paid_expense::Model {
            id: 7,
            expense_id: 3,
            unit_id: "IT".to_owned(),
            category: "Travel".to_owned(),
            amount: dec!(300.00),
            created_at: at(2024, 3, 10),
        }
    }

    fn request_row() -> expense_request::Model {
        expense_request::Model {
            id: 3,
            user_id: 1,
            unit_id: "IT".to_owned(),
            amount: dec!(300.00),
            category: "Travel".to_owned(),
            created_at: at(2024, 1, 15),
            is_finalized: true,
        }
    }

    fn budget_row() -> budget::Model {
        budget::Model {
            unit_id: "IT".to_owned(),
            expense_category: "Travel".to_owned(),
            year: 2024,
            budget_limit: dec!(1000),
            threshold_ratio: dec!(0.1),
        }
    }

    fn app(db: DatabaseConnection) -> axum::Router {
        create_router(AppState { db: Arc::new(db) })
    }

    async fn send_pay(db: DatabaseConnection, path: &str) -> (StatusCode, serde_json::Value) {
        let response = app(db)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(path)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, body)
    }

    fn as_decimal(value: &serde_json::Value) -> Decimal {
        Decimal::from_str(value.as_str().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_pay_reports_budget_status() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![paid()]])
            .append_query_results([vec![request_row()]])
            .append_query_results([vec![budget_row()]])
            .append_query_results([vec![BTreeMap::from([(
                "spent",
                Value::Decimal(None),
            )])]])
            .into_connection();

        let (status, body) = send_pay(db, "/expense_requests/7/pay").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["paidExpense"]["id"], 7);
        assert_eq!(body["paidExpense"]["expenseID"], 3);
        assert_eq!(body["paidExpense"]["unitID"], "IT");
        assert_eq!(body["budget"]["year"], 2024);
        assert_eq!(as_decimal(&body["budget"]["limit"]), dec!(1000));
        assert_eq!(as_decimal(&body["budget"]["threshold"]), dec!(0.1));
        assert_eq!(as_decimal(&body["budget"]["spent"]), dec!(0));
        assert_eq!(as_decimal(&body["budget"]["rest"]), dec!(1000));
        assert_eq!(as_decimal(&body["budget"]["budgetMax"]), dec!(1100));
    }

    #[tokio::test]
    async fn test_pay_over_limit_reports_negative_rest() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![paid()]])
            .append_query_results([vec![request_row()]])
            .append_query_results([vec![budget_row()]])
            .append_query_results([vec![BTreeMap::from([(
                "spent",
                Value::from(dec!(1200)),
            )])]])
            .into_connection();

        let (status, body) = send_pay(db, "/expense_requests/7/pay").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_decimal(&body["budget"]["rest"]), dec!(-200));
        assert_eq!(as_decimal(&body["budget"]["budgetMax"]), dec!(1100));
    }

    #[tokio::test]
    async fn test_pay_unknown_payment_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<paid_expense::Model>::new()])
            .into_connection();

        let (status, body) = send_pay(db, "/expense_requests/99/pay").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
        assert!(body.get("paidExpense").is_none());
    }

    #[tokio::test]
    async fn test_pay_missing_budget_is_server_side() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![paid()]])
            .append_query_results([vec![request_row()]])
            .append_query_results([Vec::<budget::Model>::new()])
            .into_connection();

        let (status, body) = send_pay(db, "/expense_requests/7/pay").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "DEPENDENCY_MISSING");
    }

    #[tokio::test]
    async fn test_pay_malformed_id_is_bad_request() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let (status, _body) = send_pay(db, "/expense_requests/abc/pay").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
