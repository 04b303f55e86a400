//! `SeaORM` entity for the budget table.
//!
//! Keyed by (unit, category, year); at most one row exists per triple.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "budget")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub unit_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub expense_category: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub year: i32,
    pub budget_limit: Decimal,
    /// Fractional overage allowed above the limit (0.1 = 10% over).
    pub threshold_ratio: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
