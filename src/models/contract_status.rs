use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reference rows seeded by the migrations.
pub const ACTIVE: i32 = 1;
pub const COMPLETED: i32 = 2;
pub const CANCELLED: i32 = 3;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contract_statuses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String, // 'active', 'completed', 'cancelled'
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::rental_contract::Entity")]
    RentalContract,
}

impl Related<super::rental_contract::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RentalContract.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
