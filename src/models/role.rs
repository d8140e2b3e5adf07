use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reference rows seeded by the migrations.
pub const ADMIN: i32 = 1;
pub const MANAGER: i32 = 2;
pub const CLIENT: i32 = 3;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String, // 'admin', 'manager', 'client'
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user::Entity")]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
