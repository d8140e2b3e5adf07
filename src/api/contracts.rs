use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::Claims;
use crate::models::rental_contract::ContractDto;
use crate::services::contract_service::{self, ContractFilter};

use super::{require_staff, service_error, ApiError};

#[derive(Deserialize)]
pub struct ListContractsQuery {
    pub client_id: Option<i32>,
    pub status_id: Option<i32>,
}

#[derive(Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

pub async fn list_contracts(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Query(query): Query<ListContractsQuery>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&claims)?;

    let contracts = contract_service::list_contracts(
        &db,
        ContractFilter {
            client_id: query.client_id,
            status_id: query.status_id,
        },
    )
    .await
    .map_err(service_error)?;
    let total = contracts.len();

    Ok(Json(json!({ "contracts": contracts, "total": total })))
}

pub async fn get_contract(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&claims)?;

    let contract = contract_service::get_contract(&db, id)
        .await
        .map_err(service_error)?;
    Ok(Json(json!({ "contract": contract })))
}

pub async fn create_contract(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<ContractDto>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&claims)?;

    let contract = contract_service::create_contract(&db, payload)
        .await
        .map_err(service_error)?;

    Ok(Json(
        json!({ "contract": contract, "message": "Contract created, car marked as rented" }),
    ))
}

/// Direct single-contract delete: frees the car, removes only this row.
pub async fn delete_contract(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&claims)?;

    if !query.confirm {
        // Nothing cascades here, but the action is still destructive.
        contract_service::get_contract(&db, id)
            .await
            .map_err(service_error)?;
        return Err((
            StatusCode::CONFLICT,
            Json(json!({
                "error": "Confirmation required",
                "message": "Deleting this rental record returns the car to the free status and removes the record from the history.",
            })),
        ));
    }

    contract_service::delete_contract(&db, id)
        .await
        .map_err(service_error)?;

    Ok(Json(json!({
        "message": "Rental record deleted, car is free for rental again",
    })))
}
