use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "car_inspections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub contract_id: i32,
    pub inspection_type: String, // 'handover', 'return'
    pub inspection_date: String,
    pub notes: String,
    pub damage_cost: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rental_contract::Entity",
        from = "Column::ContractId",
        to = "super::rental_contract::Column::Id"
    )]
    RentalContract,
}

impl Related<super::rental_contract::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RentalContract.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Serialize, Deserialize)]
pub struct InspectionDto {
    pub id: Option<i32>,
    pub contract_id: i32,
    pub inspection_type: String,
    pub inspection_date: String,
    pub notes: String,
    pub damage_cost: f64,
}
