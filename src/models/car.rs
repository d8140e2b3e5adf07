use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub plate_number: String,
    pub color: String,
    pub year: i32,
    pub price_per_day: f64,
    pub status_id: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl Model {
    /// Display name shown in contract listings.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::car_status::Entity",
        from = "Column::StatusId",
        to = "super::car_status::Column::Id"
    )]
    CarStatus,
    #[sea_orm(has_many = "super::rental_contract::Entity")]
    RentalContract,
}

impl Related<super::car_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CarStatus.def()
    }
}

impl Related<super::rental_contract::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RentalContract.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Serialize, Deserialize)]
pub struct CarDto {
    pub id: Option<i32>,
    pub brand: String,
    pub model: String,
    pub plate_number: String,
    pub color: String,
    pub year: i32,
    pub price_per_day: f64,
    pub status_id: Option<i32>,
}
