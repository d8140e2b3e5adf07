//! Client portal: a client sees their own profile and rental history. The
//! desktop shell polls `my_contracts` on a fixed timer to keep the list
//! fresh.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::*;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::Claims;
use crate::models::user::{self, Entity as User};
use crate::services::contract_service::{self, ContractFilter};
use crate::services::{client_service, ServiceError};

use super::{require_client, service_error, ApiError};

#[derive(Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

async fn current_user(db: &DatabaseConnection, claims: &Claims) -> Result<user::Model, ApiError> {
    User::find()
        .filter(user::Column::Login.eq(&claims.sub))
        .one(db)
        .await
        .map_err(|e| service_error(ServiceError::from(e)))?
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "Client data was not found. The account may have been removed by an administrator.",
            })),
        ))
}

pub async fn get_profile(
    State(db): State<DatabaseConnection>,
    claims: Claims,
) -> Result<Json<Value>, ApiError> {
    require_client(&claims)?;

    let user = current_user(&db, &claims).await?;
    let (client, created) = client_service::resolve_for_user(&db, &user)
        .await
        .map_err(service_error)?;

    let mut body = json!({ "client": client, "created": created });
    if created {
        body["message"] = json!(
            "Client profile was created automatically. Please fill in your details in the profile editor."
        );
    }

    Ok(Json(body))
}

pub async fn my_contracts(
    State(db): State<DatabaseConnection>,
    claims: Claims,
) -> Result<Json<Value>, ApiError> {
    require_client(&claims)?;

    let user = current_user(&db, &claims).await?;
    let (client, _) = client_service::resolve_for_user(&db, &user)
        .await
        .map_err(service_error)?;

    let contracts = contract_service::list_contracts(
        &db,
        ContractFilter {
            client_id: Some(client.id),
            status_id: None,
        },
    )
    .await
    .map_err(service_error)?;
    let total = contracts.len();

    Ok(Json(json!({ "contracts": contracts, "total": total })))
}

/// A client removes one of their own rental records. Same semantics as the
/// staff-side direct contract delete.
pub async fn delete_my_contract(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Value>, ApiError> {
    require_client(&claims)?;

    let user = current_user(&db, &claims).await?;
    let (client, _) = client_service::resolve_for_user(&db, &user)
        .await
        .map_err(service_error)?;

    let contract = contract_service::get_contract(&db, id)
        .await
        .map_err(service_error)?;

    if contract.client_id != client.id {
        return Err((
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "This rental record belongs to another client" })),
        ));
    }

    if !query.confirm {
        return Err((
            StatusCode::CONFLICT,
            Json(json!({
                "error": "Confirmation required",
                "message": "Deleting this rental record returns the car to the free status and removes the record from your rental history.",
            })),
        ));
    }

    contract_service::delete_contract(&db, id)
        .await
        .map_err(service_error)?;

    Ok(Json(json!({
        "message": "Rental record deleted, the car is free for rental again",
    })))
}
