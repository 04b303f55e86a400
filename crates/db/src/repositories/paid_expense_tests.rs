//! Tests for paid expense list filtering.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseBackend, MockDatabase};

use super::{PaidExpenseFilter, PaidExpenseRepository};
use crate::entities::paid_expense;

fn sample() -> paid_expense::Model {
    paid_expense::Model {
        id: 1,
        expense_id: 3,
        unit_id: "IT".to_owned(),
        category: "Travel".to_owned(),
        amount: dec!(120.50),
        created_at: NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap(),
    }
}

#[tokio::test]
async fn test_list_without_filters_selects_all() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![sample()]])
        .into_connection();

    let repo = PaidExpenseRepository::new(db.clone());
    let rows = repo.list(PaidExpenseFilter::default()).await.unwrap();

    assert_eq!(rows, vec![sample()]);

    let log = db.into_transaction_log();
    assert!(!format!("{:?}", log[0]).contains("WHERE"));
}

#[tokio::test]
async fn test_list_date_part_filters_use_created_at_extracts() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![sample()]])
        .into_connection();

    let filter = PaidExpenseFilter {
        unit_id: Some("IT".to_owned()),
        year: Some(2024),
        month: Some(6),
        ..Default::default()
    };
    let rows = PaidExpenseRepository::new(db.clone()).list(filter).await.unwrap();
    assert_eq!(rows.len(), 1);

    let sql = format!("{:?}", db.into_transaction_log()[0]);
    assert!(sql.contains("EXTRACT(YEAR FROM created_at)"));
    assert!(sql.contains("EXTRACT(MONTH FROM created_at)"));
}

#[tokio::test]
async fn test_list_amount_bounds_are_inclusive_comparisons() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<paid_expense::Model>::new()])
        .into_connection();

    let filter = PaidExpenseFilter {
        min_amount: Some(dec!(10)),
        max_amount: Some(dec!(500)),
        ..Default::default()
    };
    let rows = PaidExpenseRepository::new(db.clone()).list(filter).await.unwrap();
    assert!(rows.is_empty());

    let sql = format!("{:?}", db.into_transaction_log()[0]);
    assert!(sql.contains(">="));
    assert!(sql.contains("<="));
}
