pub mod auth;
pub mod cars;
pub mod clients;
pub mod contracts;
pub mod employees;
pub mod health;
pub mod inspections;
pub mod portal;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};

use crate::auth::Claims;
use crate::services::ServiceError;

pub(crate) type ApiError = (StatusCode, Json<Value>);

/// Maps service failures onto HTTP responses. Foreign-key rejections get
/// the manual-cleanup hint the management views show next to the error.
pub(crate) fn service_error(err: ServiceError) -> ApiError {
    match err {
        ServiceError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Resource not found" })),
        ),
        ServiceError::Validation(msg) => {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "error": msg })))
        }
        ServiceError::InvalidState(msg) => (StatusCode::CONFLICT, Json(json!({ "error": msg }))),
        ServiceError::IntegrityViolation(msg) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": format!("Integrity violation: {}", msg),
                "hint": "Other rows still reference this record; remove them manually and retry.",
                "kind": "foreign_key",
            })),
        ),
        ServiceError::Database(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": msg })),
        ),
    }
}

pub(crate) fn require_staff(claims: &Claims) -> Result<(), ApiError> {
    if claims.is_staff() {
        Ok(())
    } else {
        Err((
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Staff access required" })),
        ))
    }
}

pub(crate) fn require_client(claims: &Claims) -> Result<(), ApiError> {
    if claims.is_client() {
        Ok(())
    } else {
        Err((
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Client access required" })),
        ))
    }
}

pub fn api_router(db: DatabaseConnection) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::get_me))
        // Cars
        .route("/cars", get(cars::list_cars).post(cars::create_car))
        .route(
            "/cars/:id",
            get(cars::get_car)
                .put(cars::update_car)
                .delete(cars::delete_car),
        )
        .route("/cars/:id/cascade", get(cars::cascade_preview))
        // Clients
        .route(
            "/clients",
            get(clients::list_clients).post(clients::create_client),
        )
        .route(
            "/clients/:id",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        .route("/clients/:id/cascade", get(clients::cascade_preview))
        // Employees
        .route(
            "/employees",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route(
            "/employees/:id",
            get(employees::get_employee)
                .put(employees::update_employee)
                .delete(employees::delete_employee),
        )
        .route("/employees/:id/cascade", get(employees::cascade_preview))
        // Contracts
        .route(
            "/contracts",
            get(contracts::list_contracts).post(contracts::create_contract),
        )
        .route(
            "/contracts/:id",
            get(contracts::get_contract).delete(contracts::delete_contract),
        )
        .route(
            "/contracts/:id/inspections",
            get(inspections::list_for_contract),
        )
        .route("/inspections", post(inspections::create_inspection))
        // Client portal
        .route("/portal/profile", get(portal::get_profile))
        .route("/portal/contracts", get(portal::my_contracts))
        .route(
            "/portal/contracts/:id",
            axum::routing::delete(portal::delete_my_contract),
        )
        .with_state(db)
}
