use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub passport_number: String,
    pub driver_license_number: String,
    pub phone: String,
    pub email: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::rental_contract::Entity")]
    RentalContract,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::rental_contract::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RentalContract.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Create/update payload. The backing user row is managed together with
/// the client row; `password` is only honoured on create.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClientDto {
    pub id: Option<i32>,
    pub login: String,
    pub password: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub passport_number: String,
    pub driver_license_number: String,
    pub phone: String,
    pub email: Option<String>,
}
