use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::Claims;
use crate::models::client::ClientDto;
use crate::services::{cascade_service, client_service};

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

pub async fn list_clients(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&claims)?;

    let clients = client_service::list_clients(&db, query.q.as_deref())
        .await
        .map_err(service_error)?;
    let total = clients.len();

    Ok(Json(json!({ "clients": clients, "total": total })))
}

pub async fn get_client(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&claims)?;

    let client = client_service::get_client(&db, id)
        .await
        .map_err(service_error)?;
    Ok(Json(json!({ "client": client })))
}

pub async fn create_client(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<ClientDto>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&claims)?;

    let client = client_service::create_client(&db, payload)
        .await
        .map_err(service_error)?;

    Ok(Json(json!({ "client": client, "message": "Client created" })))
}

pub async fn update_client(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
    Json(mut payload): Json<ClientDto>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&claims)?;

    payload.id = Some(id);
    let client = client_service::update_client(&db, payload)
        .await
        .map_err(service_error)?;

    Ok(Json(json!({ "client": client, "message": "Client updated" })))
}

pub async fn cascade_preview(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&claims)?;

    let preview = cascade_service::preview_client(&db, id)
        .await
        .map_err(service_error)?;

    Ok(Json(json!({ "preview": preview })))
}

pub async fn delete_client(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Value>, ApiError> {
    require_staff(&claims)?;

    if !query.confirm {
        let preview = cascade_service::preview_client(&db, id)
            .await
            .map_err(service_error)?;
        return Err((
            StatusCode::CONFLICT,
            Json(json!({
                "error": "Confirmation required",
                "message": "Deleting this client also removes all of their rental contracts, every inspection under those contracts, and their user account.",
                "preview": preview,
            })),
        ));
    }

    let outcome = cascade_service::delete_client(&db, id)
        .await
        .map_err(service_error)?;

    Ok(Json(json!({
        "message": "Client and all dependent records deleted",
        "contracts_removed": outcome.contracts_removed,
        "inspections_removed": outcome.inspections_removed,
        "user_removed": outcome.user_removed,
    })))
}
