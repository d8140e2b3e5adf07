//! Referential-integrity cascade deleter.
//!
//! Deleting a car, client or employee must first remove every rental
//! contract referencing it, which in turn requires removing every
//! inspection referencing those contracts. The whole sweep runs in one
//! transaction: either every row goes, or none do.

use sea_orm::*;
use serde::Serialize;

use crate::models::car::Entity as Car;
use crate::models::car_inspection::{self, Entity as CarInspection};
use crate::models::client::Entity as Client;
use crate::models::employee::Entity as Employee;
use crate::models::rental_contract::{self, Entity as RentalContract};
use crate::models::user::Entity as User;

use super::ServiceError;

/// What a completed cascade removed, for display by the caller.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CascadeOutcome {
    pub contracts_removed: u64,
    pub inspections_removed: u64,
    pub user_removed: bool,
}

/// What a cascade *would* remove. Drives the confirmation step at the UI
/// boundary before the destructive call is made.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CascadePreview {
    pub contracts: u64,
    pub inspections: u64,
    pub removes_user: bool,
}

/// Removes all contracts whose `fk` column matches `root_id`, inspections
/// first. Shared by the three root variants.
async fn sweep_contracts<C>(
    conn: &C,
    fk: rental_contract::Column,
    root_id: i32,
) -> Result<(u64, u64), DbErr>
where
    C: ConnectionTrait,
{
    let contract_ids: Vec<i32> = RentalContract::find()
        .filter(fk.eq(root_id))
        .all(conn)
        .await?
        .iter()
        .map(|c| c.id)
        .collect();

    if contract_ids.is_empty() {
        return Ok((0, 0));
    }

    let inspections_removed = CarInspection::delete_many()
        .filter(car_inspection::Column::ContractId.is_in(contract_ids.clone()))
        .exec(conn)
        .await?
        .rows_affected;

    let contracts_removed = RentalContract::delete_many()
        .filter(rental_contract::Column::Id.is_in(contract_ids))
        .exec(conn)
        .await?
        .rows_affected;

    Ok((contracts_removed, inspections_removed))
}

/// Counts what `sweep_contracts` would remove, without removing anything.
async fn count_dependents(
    db: &DatabaseConnection,
    fk: rental_contract::Column,
    root_id: i32,
) -> Result<(u64, u64), DbErr> {
    let contract_ids: Vec<i32> = RentalContract::find()
        .filter(fk.eq(root_id))
        .all(db)
        .await?
        .iter()
        .map(|c| c.id)
        .collect();

    if contract_ids.is_empty() {
        return Ok((0, 0));
    }

    let inspections = CarInspection::find()
        .filter(car_inspection::Column::ContractId.is_in(contract_ids.clone()))
        .count(db)
        .await?;

    Ok((contract_ids.len() as u64, inspections))
}

/// Delete a car together with its contracts and their inspections.
pub async fn delete_car(db: &DatabaseConnection, id: i32) -> Result<CascadeOutcome, ServiceError> {
    let car = Car::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let txn = db.begin().await?;

    let (contracts_removed, inspections_removed) =
        sweep_contracts(&txn, rental_contract::Column::CarId, car.id).await?;
    car.delete(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        car_id = id,
        contracts_removed,
        inspections_removed,
        "car deleted with dependents"
    );

    Ok(CascadeOutcome {
        contracts_removed,
        inspections_removed,
        user_removed: false,
    })
}

/// Delete a client together with its contracts, their inspections, and the
/// backing user row.
pub async fn delete_client(
    db: &DatabaseConnection,
    id: i32,
) -> Result<CascadeOutcome, ServiceError> {
    let client = Client::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;
    let user_id = client.user_id;

    let txn = db.begin().await?;

    let (contracts_removed, inspections_removed) =
        sweep_contracts(&txn, rental_contract::Column::ClientId, client.id).await?;

    // The client row references the user row, so it has to go first.
    client.delete(&txn).await?;

    let user_removed = match User::find_by_id(user_id).one(&txn).await? {
        Some(user) => {
            user.delete(&txn).await?;
            true
        }
        None => false,
    };

    txn.commit().await?;

    tracing::info!(
        client_id = id,
        contracts_removed,
        inspections_removed,
        user_removed,
        "client deleted with dependents"
    );

    Ok(CascadeOutcome {
        contracts_removed,
        inspections_removed,
        user_removed,
    })
}

/// Delete an employee together with the contracts it managed and their
/// inspections. The employee's user row is kept.
pub async fn delete_employee(
    db: &DatabaseConnection,
    id: i32,
) -> Result<CascadeOutcome, ServiceError> {
    let employee = Employee::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let txn = db.begin().await?;

    let (contracts_removed, inspections_removed) =
        sweep_contracts(&txn, rental_contract::Column::ManagerId, employee.id).await?;
    employee.delete(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        employee_id = id,
        contracts_removed,
        inspections_removed,
        "employee deleted with dependents"
    );

    Ok(CascadeOutcome {
        contracts_removed,
        inspections_removed,
        user_removed: false,
    })
}

pub async fn preview_car(db: &DatabaseConnection, id: i32) -> Result<CascadePreview, ServiceError> {
    Car::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let (contracts, inspections) =
        count_dependents(db, rental_contract::Column::CarId, id).await?;
    Ok(CascadePreview {
        contracts,
        inspections,
        removes_user: false,
    })
}

pub async fn preview_client(
    db: &DatabaseConnection,
    id: i32,
) -> Result<CascadePreview, ServiceError> {
    let client = Client::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let (contracts, inspections) =
        count_dependents(db, rental_contract::Column::ClientId, id).await?;
    let removes_user = User::find_by_id(client.user_id).one(db).await?.is_some();

    Ok(CascadePreview {
        contracts,
        inspections,
        removes_user,
    })
}

pub async fn preview_employee(
    db: &DatabaseConnection,
    id: i32,
) -> Result<CascadePreview, ServiceError> {
    Employee::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let (contracts, inspections) =
        count_dependents(db, rental_contract::Column::ManagerId, id).await?;
    Ok(CascadePreview {
        contracts,
        inspections,
        removes_user: false,
    })
}
