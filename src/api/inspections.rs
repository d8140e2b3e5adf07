use axum::{
    extract::{Path, State},
    Json,
};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};

use crate::auth::Claims;
use crate::models::car_inspection::InspectionDto;
use crate::services::inspection_service;

use super::{require_staff, service_error, ApiError};

pub async fn list_for_contract(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(contract_id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&claims)?;

    let inspections = inspection_service::list_for_contract(&db, contract_id)
        .await
        .map_err(service_error)?;
    let total = inspections.len();

    Ok(Json(json!({ "inspections": inspections, "total": total })))
}

pub async fn create_inspection(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<InspectionDto>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&claims)?;

    let inspection = inspection_service::create_inspection(&db, payload)
        .await
        .map_err(service_error)?;

    Ok(Json(
        json!({ "inspection": inspection, "message": "Inspection recorded" }),
    ))
}
