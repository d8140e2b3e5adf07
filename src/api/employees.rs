use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::Claims;
use crate::models::employee::EmployeeDto;
use crate::services::{cascade_service, employee_service};

use super::{require_staff, service_error, ApiError};

#[derive(Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
}

#[derive(Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

pub async fn list_employees(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&claims)?;

    let employees = employee_service::list_employees(&db, query.q.as_deref())
        .await
        .map_err(service_error)?;
    let total = employees.len();

    Ok(Json(json!({ "employees": employees, "total": total })))
}

pub async fn get_employee(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&claims)?;

    let employee = employee_service::get_employee(&db, id)
        .await
        .map_err(service_error)?;
    Ok(Json(json!({ "employee": employee })))
}

pub async fn create_employee(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<EmployeeDto>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&claims)?;

    let employee = employee_service::create_employee(&db, payload)
        .await
        .map_err(service_error)?;

    Ok(Json(
        json!({ "employee": employee, "message": "Employee created" }),
    ))
}

pub async fn update_employee(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
    Json(mut payload): Json<EmployeeDto>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&claims)?;

    payload.id = Some(id);
    let employee = employee_service::update_employee(&db, payload)
        .await
        .map_err(service_error)?;

    Ok(Json(
        json!({ "employee": employee, "message": "Employee updated" }),
    ))
}

pub async fn cascade_preview(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&claims)?;

    let preview = cascade_service::preview_employee(&db, id)
        .await
        .map_err(service_error)?;

    Ok(Json(json!({ "preview": preview })))
}

pub async fn delete_employee(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&claims)?;

    if !query.confirm {
        let preview = cascade_service::preview_employee(&db, id)
            .await
            .map_err(service_error)?;
        return Err((
            StatusCode::CONFLICT,
            Json(json!({
                "error": "Confirmation required",
                "message": "Deleting this employee also removes every rental contract they managed and every inspection under those contracts.",
                "preview": preview,
            })),
        ));
    }

    let outcome = cascade_service::delete_employee(&db, id)
        .await
        .map_err(service_error)?;

    Ok(Json(json!({
        "message": "Employee and all dependent records deleted",
        "contracts_removed": outcome.contracts_removed,
        "inspections_removed": outcome.inspections_removed,
    })))
}
