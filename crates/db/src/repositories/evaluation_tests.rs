//! Tests for the pay-expense evaluation sequence.
//!
//! The repository is exercised against a `MockDatabase`; each test seeds the
//! four reads (payment, request, budget, spent aggregate) in order.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal_macros::dec;
use sea_orm::{DatabaseBackend, MockDatabase, Value};
use std::collections::BTreeMap;

use super::{EvaluationError, EvaluationRepository};
use crate::entities::{budget, expense_request, paid_expense};
use spesa_shared::AppError;

fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

fn paid(id: i32, created_at: NaiveDateTime) -> paid_expense::Model {
    paid_expense::Model {
        id,
        expense_id: 3,
        unit_id: "IT".to_owned(),
        category: "Travel".to_owned(),
        amount: dec!(300.00),
        created_at,
    }
}

fn request(created_at: NaiveDateTime) -> expense_request::Model {
    expense_request::Model {
        id: 3,
        user_id: 1,
        unit_id: "IT".to_owned(),
        amount: dec!(300.00),
        category: "Travel".to_owned(),
        created_at,
        is_finalized: true,
    }
}

fn budget_row(year: i32) -> budget::Model {
    budget::Model {
        unit_id: "IT".to_owned(),
        expense_category: "Travel".to_owned(),
        year,
        budget_limit: dec!(1000),
        threshold_ratio: dec!(0.1),
    }
}

fn spent_row(spent: Option<rust_decimal::Decimal>) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([(
        "spent",
        spent.map_or(Value::Decimal(None), Into::into),
    )])
}

#[tokio::test]
async fn test_evaluate_untouched_budget() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![paid(7, at(2024, 3, 10))]])
        .append_query_results([vec![request(at(2024, 1, 15))]])
        .append_query_results([vec![budget_row(2024)]])
        .append_query_results([vec![spent_row(None)]])
        .into_connection();

    let repo = EvaluationRepository::new(db.clone());
    let result = repo.evaluate(7).await.unwrap();

    assert_eq!(result.paid_expense.id, 7);
    assert_eq!(result.status.year, 2024);
    assert_eq!(result.status.limit, dec!(1000));
    assert_eq!(result.status.threshold, dec!(0.1));
    assert_eq!(result.status.spent, dec!(0));
    assert_eq!(result.status.rest, dec!(1000));
    assert_eq!(result.status.budget_max, dec!(1100));

    // Exactly the four reads, nothing else.
    let log = db.into_transaction_log();
    assert_eq!(log.len(), 4);
    assert!(format!("{:?}", log[3]).contains("EXTRACT(YEAR FROM created_at)"));
}

#[tokio::test]
async fn test_evaluate_spent_beyond_hard_ceiling() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![paid(7, at(2024, 3, 10))]])
        .append_query_results([vec![request(at(2024, 1, 15))]])
        .append_query_results([vec![budget_row(2024)]])
        .append_query_results([vec![spent_row(Some(dec!(1200)))]])
        .into_connection();

    let result = EvaluationRepository::new(db).evaluate(7).await.unwrap();

    assert_eq!(result.status.rest, dec!(-200));
    assert_eq!(result.status.budget_max, dec!(1100));
    assert!(result.status.spent > result.status.budget_max);
}

#[tokio::test]
async fn test_evaluate_uses_request_year_for_budget_lookup() {
    // Payment recorded in 2025, request created in 2024: the budget row is
    // the 2024 one, keyed by the request's creation year.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![paid(7, at(2025, 1, 2))]])
        .append_query_results([vec![request(at(2024, 12, 30))]])
        .append_query_results([vec![budget_row(2024)]])
        .append_query_results([vec![spent_row(Some(dec!(450)))]])
        .into_connection();

    let repo = EvaluationRepository::new(db.clone());
    let result = repo.evaluate(7).await.unwrap();

    assert_eq!(result.status.year, 2024);
    assert_eq!(result.status.spent, dec!(450));

    let log = db.into_transaction_log();
    assert!(format!("{:?}", log[2]).contains("2024"));
    assert!(format!("{:?}", log[3]).contains("2024"));
}

#[tokio::test]
async fn test_evaluate_payment_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<paid_expense::Model>::new()])
        .into_connection();

    let err = EvaluationRepository::new(db).evaluate(99).await.unwrap_err();

    assert!(matches!(err, EvaluationError::PaymentNotFound(99)));
    assert_eq!(AppError::from(err).status_code(), 404);
}

#[tokio::test]
async fn test_evaluate_missing_request_is_server_side() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![paid(7, at(2024, 3, 10))]])
        .append_query_results([Vec::<expense_request::Model>::new()])
        .into_connection();

    let err = EvaluationRepository::new(db).evaluate(7).await.unwrap_err();

    assert!(matches!(err, EvaluationError::RequestMissing(3)));
    assert_eq!(AppError::from(err).status_code(), 500);
}

#[tokio::test]
async fn test_evaluate_missing_budget_is_server_side() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![paid(7, at(2024, 3, 10))]])
        .append_query_results([vec![request(at(2024, 1, 15))]])
        .append_query_results([Vec::<budget::Model>::new()])
        .into_connection();

    let err = EvaluationRepository::new(db).evaluate(7).await.unwrap_err();

    match &err {
        EvaluationError::BudgetMissing {
            unit_id,
            category,
            year,
        } => {
            assert_eq!(unit_id, "IT");
            assert_eq!(category, "Travel");
            assert_eq!(*year, 2024);
        }
        other => panic!("expected BudgetMissing, got {other:?}"),
    }
    assert_eq!(AppError::from(err).status_code(), 500);
}

#[tokio::test]
async fn test_evaluate_twice_reads_the_same_spent() {
    // No writes happen between evaluations, so the spent total is stable.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![paid(7, at(2024, 3, 10))]])
        .append_query_results([vec![request(at(2024, 1, 15))]])
        .append_query_results([vec![budget_row(2024)]])
        .append_query_results([vec![spent_row(Some(dec!(300)))]])
        .append_query_results([vec![paid(7, at(2024, 3, 10))]])
        .append_query_results([vec![request(at(2024, 1, 15))]])
        .append_query_results([vec![budget_row(2024)]])
        .append_query_results([vec![spent_row(Some(dec!(300)))]])
        .into_connection();

    let repo = EvaluationRepository::new(db);
    let first = repo.evaluate(7).await.unwrap();
    let second = repo.evaluate(7).await.unwrap();

    assert_eq!(first.status, second.status);
}
