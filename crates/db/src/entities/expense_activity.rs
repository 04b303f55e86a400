//! `SeaORM` entity for the expense_activity table.
//!
//! `current_state` is stored verbatim. The original system records state
//! strings (Pending, Approved, Rejected, CategoryChanged, Payed,
//! PartiallyPayed) without validating transitions, and this schema keeps
//! that behavior.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "expense_activity")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub expense_id: i32,
    pub current_state: String,
    pub feedback: String,
    pub created_by: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
