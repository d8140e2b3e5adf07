use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reference rows seeded by the migrations. A car released from a
/// contract always goes back to `FREE`.
pub const FREE: i32 = 1;
pub const RENTED: i32 = 2;
pub const MAINTENANCE: i32 = 3;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "car_statuses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String, // 'free', 'rented', 'maintenance'
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::car::Entity")]
    Car,
}

impl Related<super::car::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Car.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
