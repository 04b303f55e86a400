//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Every list operation takes a filter struct whose `Some`
//! fields are ANDed together, mirroring the query-string filters the API
//! accepts.

pub mod announcement;
pub mod budget;
pub mod evaluation;
pub mod expense_activity;
pub mod expense_category;
pub mod expense_request;
pub mod paid_expense;
pub mod unit;
pub mod user;

pub use announcement::{AnnouncementFilter, AnnouncementInput, AnnouncementRepository};
pub use budget::{BudgetFilter, BudgetInput, BudgetKey, BudgetRepository};
pub use evaluation::{EvaluationError, EvaluationRepository, PaymentEvaluation};
pub use expense_activity::{
    ExpenseActivityFilter, ExpenseActivityInput, ExpenseActivityRepository,
};
pub use expense_category::ExpenseCategoryRepository;
pub use expense_request::{ExpenseRequestFilter, ExpenseRequestInput, ExpenseRequestRepository};
pub use paid_expense::{PaidExpenseFilter, PaidExpenseInput, PaidExpenseRepository};
pub use unit::{UnitFilter, UnitInput, UnitRepository};
pub use user::{UserFilter, UserInput, UserRepository};
