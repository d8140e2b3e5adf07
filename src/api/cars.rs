use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::Claims;
use crate::models::car::CarDto;
use crate::services::{car_service, cascade_service};

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

#[utoipa::path(
    get,
    path = "/api/cars",
    params(("q" = Option<String>, Query, description = "Substring filter over brand, model, plate and color")),
    responses(
        (status = 200, description = "List of cars, filtered when q is given")
    )
)]
pub async fn list_cars(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&claims)?;

    let cars = car_service::list_cars(&db, query.q.as_deref())
        .await
        .map_err(service_error)?;
    let total = cars.len();

    Ok(Json(json!({ "cars": cars, "total": total })))
}

pub async fn get_car(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&claims)?;

    let car = car_service::get_car(&db, id).await.map_err(service_error)?;
    Ok(Json(json!({ "car": car })))
}

#[utoipa::path(
    post,
    path = "/api/cars",
    responses(
        (status = 200, description = "Car created")
    )
)]
pub async fn create_car(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<CarDto>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&claims)?;

    let car = car_service::create_car(&db, payload)
        .await
        .map_err(service_error)?;

    Ok(Json(json!({ "car": car, "message": "Car created" })))
}

pub async fn update_car(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
    Json(mut payload): Json<CarDto>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&claims)?;

    payload.id = Some(id);
    let car = car_service::update_car(&db, payload)
        .await
        .map_err(service_error)?;

    Ok(Json(json!({ "car": car, "message": "Car updated" })))
}

/// What a delete would cascade to, for the confirmation dialog.
pub async fn cascade_preview(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&claims)?;

    let preview = cascade_service::preview_car(&db, id)
        .await
        .map_err(service_error)?;

    Ok(Json(json!({ "preview": preview })))
}

#[utoipa::path(
    delete,
    path = "/api/cars/{id}",
    params(
        ("id" = i32, Path, description = "Car id"),
        ("confirm" = bool, Query, description = "Must be true to perform the cascade")
    ),
    responses(
        (status = 200, description = "Car and dependents removed"),
        (status = 409, description = "Confirmation required; body carries the cascade preview")
    )
)]
pub async fn delete_car(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&claims)?;

    if !query.confirm {
        let preview = cascade_service::preview_car(&db, id)
            .await
            .map_err(service_error)?;
        return Err((
            StatusCode::CONFLICT,
            Json(json!({
                "error": "Confirmation required",
                "message": "Deleting this car also removes all of its rental contracts and every inspection under those contracts.",
                "preview": preview,
            })),
        ));
    }

    let outcome = cascade_service::delete_car(&db, id)
        .await
        .map_err(service_error)?;

    Ok(Json(json!({
        "message": "Car and all dependent records deleted",
        "contracts_removed": outcome.contracts_removed,
        "inspections_removed": outcome.inspections_removed,
    })))
}
