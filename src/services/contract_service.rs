//! Rental contract listing, creation and the direct single-contract
//! delete. Root-entity deletion (car/client/employee) lives in
//! `cascade_service`.

use sea_orm::*;
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::car::{self, Entity as Car};
use crate::models::car_status::{self, Entity as CarStatus};
use crate::models::client::{self, Entity as Client};
use crate::models::contract_status::{self, Entity as ContractStatus};
use crate::models::employee::{self, Entity as Employee};
use crate::models::rental_contract::{self, ContractDto, Entity as RentalContract};
use crate::models::user::Entity as User;

use super::ServiceError;

/// Contract enriched with the display fields of its related rows.
#[derive(Debug, Clone, Serialize)]
pub struct ContractView {
    pub id: i32,
    pub contract_number: String,
    pub car_id: i32,
    pub car_name: String,
    pub car_plate: String,
    pub car_status_id: i32,
    pub client_id: i32,
    pub client_name: String,
    pub manager_id: i32,
    pub manager_name: String,
    pub start_date: String,
    pub planned_end_date: String,
    pub actual_end_date: Option<String>,
    pub status: String,
    pub total_amount: f64,
}

/// Filter parameters for listing contracts
#[derive(Debug, Default, Clone)]
pub struct ContractFilter {
    pub client_id: Option<i32>,
    pub status_id: Option<i32>,
}

/// List contracts newest-first with car, client, manager and status
/// display fields resolved.
pub async fn list_contracts(
    db: &DatabaseConnection,
    filter: ContractFilter,
) -> Result<Vec<ContractView>, ServiceError> {
    let mut condition = Condition::all();

    if let Some(client_id) = filter.client_id {
        condition = condition.add(rental_contract::Column::ClientId.eq(client_id));
    }

    if let Some(status_id) = filter.status_id {
        condition = condition.add(rental_contract::Column::StatusId.eq(status_id));
    }

    let contracts_with_cars = RentalContract::find()
        .filter(condition)
        .order_by_desc(rental_contract::Column::StartDate)
        .find_also_related(Car)
        .all(db)
        .await?;

    // Resolve client and manager names through their user rows
    let client_ids: Vec<i32> = contracts_with_cars.iter().map(|(c, _)| c.client_id).collect();
    let manager_ids: Vec<i32> = contracts_with_cars
        .iter()
        .map(|(c, _)| c.manager_id)
        .collect();

    let mut client_names: HashMap<i32, String> = HashMap::new();
    if !client_ids.is_empty() {
        for (row, user) in Client::find()
            .filter(client::Column::Id.is_in(client_ids))
            .find_also_related(User)
            .all(db)
            .await?
        {
            let name = user
                .map(|u| u.full_name())
                .unwrap_or_else(|| "Unknown".to_string());
            client_names.insert(row.id, name);
        }
    }

    let mut manager_names: HashMap<i32, String> = HashMap::new();
    if !manager_ids.is_empty() {
        for (row, user) in Employee::find()
            .filter(employee::Column::Id.is_in(manager_ids))
            .find_also_related(User)
            .all(db)
            .await?
        {
            let name = user
                .map(|u| u.full_name())
                .unwrap_or_else(|| "Unknown".to_string());
            manager_names.insert(row.id, name);
        }
    }

    let status_names: HashMap<i32, String> = ContractStatus::find()
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.id, s.name))
        .collect();

    let result = contracts_with_cars
        .into_iter()
        .map(|(contract, car)| {
            let (car_name, car_plate, car_status_id) = match &car {
                Some(c) => (c.display_name(), c.plate_number.clone(), c.status_id),
                None => ("Car unavailable".to_string(), String::new(), 0),
            };

            ContractView {
                id: contract.id,
                contract_number: contract.contract_number,
                car_id: contract.car_id,
                car_name,
                car_plate,
                car_status_id,
                client_id: contract.client_id,
                client_name: client_names
                    .get(&contract.client_id)
                    .cloned()
                    .unwrap_or_else(|| "Unknown".to_string()),
                manager_id: contract.manager_id,
                manager_name: manager_names
                    .get(&contract.manager_id)
                    .cloned()
                    .unwrap_or_else(|| "Unknown".to_string()),
                start_date: contract.start_date,
                planned_end_date: contract.planned_end_date,
                actual_end_date: contract.actual_end_date,
                status: status_names
                    .get(&contract.status_id)
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                total_amount: contract.total_amount,
            }
        })
        .collect();

    Ok(result)
}

pub async fn get_contract(
    db: &DatabaseConnection,
    id: i32,
) -> Result<rental_contract::Model, ServiceError> {
    RentalContract::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)
}

/// Create a new contract. The car must be free; it is flipped to rented.
pub async fn create_contract(
    db: &DatabaseConnection,
    dto: ContractDto,
) -> Result<rental_contract::Model, ServiceError> {
    let now = chrono::Utc::now().to_rfc3339();

    let car = Car::find_by_id(dto.car_id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    if car.status_id != car_status::FREE {
        let status = CarStatus::find_by_id(car.status_id)
            .one(db)
            .await?
            .map(|s| s.name)
            .unwrap_or_else(|| "unavailable".to_string());
        return Err(ServiceError::InvalidState(format!(
            "Car is currently {}",
            status
        )));
    }

    Client::find_by_id(dto.client_id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;
    Employee::find_by_id(dto.manager_id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let new_contract = rental_contract::ActiveModel {
        contract_number: Set(format!("RC-{}", Uuid::new_v4().simple())),
        car_id: Set(dto.car_id),
        client_id: Set(dto.client_id),
        manager_id: Set(dto.manager_id),
        start_date: Set(dto.start_date),
        planned_end_date: Set(dto.planned_end_date),
        actual_end_date: Set(None),
        status_id: Set(contract_status::ACTIVE),
        total_amount: Set(dto.total_amount),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    };

    let saved = new_contract.insert(db).await?;

    let mut car_active: car::ActiveModel = car.into();
    car_active.status_id = Set(car_status::RENTED);
    car_active.updated_at = Set(now);
    car_active.update(db).await?;

    Ok(saved)
}

/// Delete one contract directly: the car goes back to free and the single
/// contract row is removed, in one batch. Inspections referencing the
/// contract are left in place, unlike the root cascades.
pub async fn delete_contract(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let contract = RentalContract::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let txn = db.begin().await?;

    if let Some(car) = Car::find_by_id(contract.car_id).one(&txn).await? {
        if car.status_id != car_status::FREE {
            let mut car_active: car::ActiveModel = car.into();
            car_active.status_id = Set(car_status::FREE);
            car_active.updated_at = Set(chrono::Utc::now().to_rfc3339());
            car_active.update(&txn).await?;
        }
    }

    contract.delete(&txn).await?;

    txn.commit().await?;

    tracing::info!(contract_id = id, "contract deleted, car released");

    Ok(())
}

/// Count contracts currently marked active.
pub async fn count_active_contracts(db: &DatabaseConnection) -> Result<u64, ServiceError> {
    Ok(RentalContract::find()
        .filter(rental_contract::Column::StatusId.eq(contract_status::ACTIVE))
        .count(db)
        .await?)
}
