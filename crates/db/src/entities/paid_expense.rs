//! `SeaORM` entity for the paid_expense table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "paid_expense")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Identifier of the originating expense request.
    pub expense_id: i32,
    pub unit_id: String,
    pub category: String,
    #[sea_orm(column_type = "Decimal(Some((7, 2)))")]
    pub amount: Decimal,
    /// Assigned by the store at insert time; never updated.
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
