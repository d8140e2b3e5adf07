use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rental_contracts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub contract_number: String,
    pub car_id: i32,
    pub client_id: i32,
    pub manager_id: i32,
    pub start_date: String,
    pub planned_end_date: String,
    pub actual_end_date: Option<String>,
    pub status_id: i32,
    pub total_amount: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::car::Entity",
        from = "Column::CarId",
        to = "super::car::Column::Id"
    )]
    Car,
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::ManagerId",
        to = "super::employee::Column::Id"
    )]
    Manager,
    #[sea_orm(
        belongs_to = "super::contract_status::Entity",
        from = "Column::StatusId",
        to = "super::contract_status::Column::Id"
    )]
    ContractStatus,
    #[sea_orm(has_many = "super::car_inspection::Entity")]
    CarInspection,
}

impl Related<super::car::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Car.def()
    }
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Manager.def()
    }
}

impl Related<super::contract_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContractStatus.def()
    }
}

impl Related<super::car_inspection::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CarInspection.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContractDto {
    pub id: Option<i32>,
    pub car_id: i32,
    pub client_id: i32,
    pub manager_id: i32,
    pub start_date: String,
    pub planned_end_date: String,
    pub total_amount: f64,
}
