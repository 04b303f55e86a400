//! `SeaORM` entity definitions.
//!
//! One module per table, named after the table. The schema carries no
//! foreign-key constraints; cross-table references are plain columns checked
//! at query time where it matters.

pub mod announcement;
pub mod budget;
pub mod expense_activity;
pub mod expense_category;
pub mod expense_request;
pub mod paid_expense;
pub mod unit;
pub mod users;
