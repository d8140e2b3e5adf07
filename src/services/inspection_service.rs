//! Car inspection records. Inspections are created against a contract and
//! only removed by the root cascades in `cascade_service`.

use sea_orm::*;

use crate::models::car_inspection::{self, Entity as CarInspection, InspectionDto};
use crate::models::rental_contract::Entity as RentalContract;

use super::ServiceError;

pub async fn list_for_contract(
    db: &DatabaseConnection,
    contract_id: i32,
) -> Result<Vec<car_inspection::Model>, ServiceError> {
    RentalContract::find_by_id(contract_id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    Ok(CarInspection::find()
        .filter(car_inspection::Column::ContractId.eq(contract_id))
        .order_by_desc(car_inspection::Column::InspectionDate)
        .all(db)
        .await?)
}

pub async fn create_inspection(
    db: &DatabaseConnection,
    dto: InspectionDto,
) -> Result<car_inspection::Model, ServiceError> {
    RentalContract::find_by_id(dto.contract_id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    if dto.damage_cost < 0.0 {
        return Err(ServiceError::Validation(
            "Damage cost cannot be negative".to_string(),
        ));
    }

    let now = chrono::Utc::now().to_rfc3339();
    let new_inspection = car_inspection::ActiveModel {
        contract_id: Set(dto.contract_id),
        inspection_type: Set(dto.inspection_type),
        inspection_date: Set(dto.inspection_date),
        notes: Set(dto.notes),
        damage_cost: Set(dto.damage_cost),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(new_inspection.insert(db).await?)
}
