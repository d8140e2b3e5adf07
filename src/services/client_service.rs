//! Client management. Each client owns exactly one user account; the two
//! rows are created and updated together. Deletion goes through
//! `cascade_service`, which also removes the user row.

use sea_orm::*;
use serde::Serialize;

use crate::auth::hash_password;
use crate::models::client::{self, ClientDto, Entity as Client};
use crate::models::role;
use crate::models::user::{self, Entity as User};

use super::{normalize_query, ServiceError};

/// Placeholder stored when a client record is auto-created for a freshly
/// registered account, before the profile is filled in.
pub const NOT_SPECIFIED: &str = "not specified";

#[derive(Debug, Clone, Serialize)]
pub struct ClientView {
    pub id: i32,
    pub user_id: i32,
    pub login: String,
    pub first_name: String,
    pub last_name: String,
    pub passport_number: String,
    pub driver_license_number: String,
    pub phone: String,
    pub email: Option<String>,
}

impl ClientView {
    fn from_rows(client: client::Model, user: Option<user::Model>) -> Self {
        let (login, first_name, last_name) = match user {
            Some(u) => (u.login, u.first_name, u.last_name),
            None => (
                "unknown".to_string(),
                "Unknown".to_string(),
                "Unknown".to_string(),
            ),
        };

        Self {
            id: client.id,
            user_id: client.user_id,
            login,
            first_name,
            last_name,
            passport_number: client.passport_number,
            driver_license_number: client.driver_license_number,
            phone: client.phone,
            email: client.email,
        }
    }

    fn matches(&self, q: &str) -> bool {
        self.first_name.to_lowercase().contains(q)
            || self.last_name.to_lowercase().contains(q)
            || self.phone.to_lowercase().contains(q)
            || self
                .email
                .as_ref()
                .map(|e| e.to_lowercase().contains(q))
                .unwrap_or(false)
    }
}

/// List all clients with their linked user, optionally filtered by a search
/// box value matched against first name, last name, phone and email.
pub async fn list_clients(
    db: &DatabaseConnection,
    query: Option<&str>,
) -> Result<Vec<ClientView>, ServiceError> {
    let rows = Client::find()
        .order_by_asc(client::Column::Id)
        .find_also_related(User)
        .all(db)
        .await?;

    let mut clients: Vec<ClientView> = rows
        .into_iter()
        .map(|(client, user)| ClientView::from_rows(client, user))
        .collect();

    if let Some(q) = normalize_query(query) {
        clients.retain(|c| c.matches(&q));
    }

    Ok(clients)
}

pub async fn get_client(db: &DatabaseConnection, id: i32) -> Result<ClientView, ServiceError> {
    let (client, user) = Client::find_by_id(id)
        .find_also_related(User)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    Ok(ClientView::from_rows(client, user))
}

/// Create a client together with its backing user account (client role).
pub async fn create_client(
    db: &DatabaseConnection,
    dto: ClientDto,
) -> Result<ClientView, ServiceError> {
    let password = dto
        .password
        .as_deref()
        .ok_or_else(|| ServiceError::Validation("Password is required".to_string()))?;
    let password_hash = hash_password(password).map_err(ServiceError::Validation)?;

    let now = chrono::Utc::now().to_rfc3339();
    let txn = db.begin().await?;

    let user = user::ActiveModel {
        login: Set(dto.login),
        password_hash: Set(password_hash),
        first_name: Set(dto.first_name),
        last_name: Set(dto.last_name),
        role_id: Set(role::CLIENT),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let client = client::ActiveModel {
        user_id: Set(user.id),
        passport_number: Set(dto.passport_number),
        driver_license_number: Set(dto.driver_license_number),
        phone: Set(dto.phone),
        email: Set(dto.email),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    Ok(ClientView::from_rows(client, Some(user)))
}

/// Update a client and the name fields of its user account.
pub async fn update_client(
    db: &DatabaseConnection,
    dto: ClientDto,
) -> Result<ClientView, ServiceError> {
    let id = dto.id.ok_or_else(|| {
        ServiceError::Validation("Client ID is required for update".to_string())
    })?;

    let (client, user) = Client::find_by_id(id)
        .find_also_related(User)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let now = chrono::Utc::now().to_rfc3339();
    let txn = db.begin().await?;

    let updated_user = match user {
        Some(u) => {
            let mut active: user::ActiveModel = u.into();
            active.first_name = Set(dto.first_name);
            active.last_name = Set(dto.last_name);
            active.updated_at = Set(now.clone());
            Some(active.update(&txn).await?)
        }
        None => None,
    };

    let mut active: client::ActiveModel = client.into();
    active.passport_number = Set(dto.passport_number);
    active.driver_license_number = Set(dto.driver_license_number);
    active.phone = Set(dto.phone);
    active.email = Set(dto.email);
    active.updated_at = Set(now);
    let updated_client = active.update(&txn).await?;

    txn.commit().await?;

    Ok(ClientView::from_rows(updated_client, updated_user))
}

/// Resolve the client record for an authenticated user. A client-role user
/// without a client row yet (registration not finished) gets a stub row
/// created on the spot; the returned flag tells the caller it happened.
pub async fn resolve_for_user(
    db: &DatabaseConnection,
    user: &user::Model,
) -> Result<(ClientView, bool), ServiceError> {
    if let Some(client) = Client::find()
        .filter(client::Column::UserId.eq(user.id))
        .one(db)
        .await?
    {
        return Ok((ClientView::from_rows(client, Some(user.clone())), false));
    }

    if user.role_id != role::CLIENT {
        return Err(ServiceError::InvalidState(
            "No client record is linked to this account".to_string(),
        ));
    }

    let now = chrono::Utc::now().to_rfc3339();
    let client = client::ActiveModel {
        user_id: Set(user.id),
        passport_number: Set(NOT_SPECIFIED.to_string()),
        driver_license_number: Set(NOT_SPECIFIED.to_string()),
        phone: Set(NOT_SPECIFIED.to_string()),
        email: Set(None),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(user_id = user.id, client_id = client.id, "client record auto-created");

    Ok((ClientView::from_rows(client, Some(user.clone())), true))
}
