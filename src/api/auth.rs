use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use sea_orm::*;
use serde::Deserialize;
use serde_json::json;

use crate::auth::{create_jwt, verify_password, Claims};
use crate::models::role::Entity as Role;
use crate::models::user::{self, Entity as User};

#[derive(Deserialize)]
pub struct LoginRequest {
    login: String,
    password: String,
}

pub async fn login(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    tracing::info!("Login attempt for user: {}", payload.login);

    let user = match User::find()
        .filter(user::Column::Login.eq(&payload.login))
        .one(&db)
        .await
    {
        Ok(Some(u)) => u,
        _ => {
            tracing::warn!("User not found: {}", payload.login);
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid credentials" })),
            )
                .into_response();
        }
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {
            let role = match Role::find_by_id(user.role_id).one(&db).await {
                Ok(Some(r)) => r.name,
                _ => {
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "error": "Account role could not be resolved" })),
                    )
                        .into_response();
                }
            };

            let token = match create_jwt(&user.login, &role) {
                Ok(t) => t,
                Err(e) => {
                    tracing::error!("Failed to issue token: {}", e);
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "error": "Failed to issue token" })),
                    )
                        .into_response();
                }
            };

            (
                StatusCode::OK,
                Json(json!({
                    "token": token,
                    "user": {
                        "id": user.id,
                        "login": user.login,
                        "full_name": user.full_name(),
                        "role": role,
                    }
                })),
            )
                .into_response()
        }
        _ => {
            tracing::warn!("Password verification failed for user: {}", user.login);
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid credentials" })),
            )
                .into_response()
        }
    }
}

pub async fn get_me(State(db): State<DatabaseConnection>, claims: Claims) -> impl IntoResponse {
    let user = match User::find()
        .filter(user::Column::Login.eq(&claims.sub))
        .one(&db)
        .await
    {
        Ok(Some(u)) => u,
        _ => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Account no longer exists" })),
            )
                .into_response();
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "id": user.id,
            "login": user.login,
            "first_name": user.first_name,
            "last_name": user.last_name,
            "role": claims.role,
        })),
    )
        .into_response()
}
