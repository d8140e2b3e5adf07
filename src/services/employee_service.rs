//! Employee management. Mirrors the client service, except that deleting
//! an employee keeps its user account (cascade_service).

use sea_orm::*;
use serde::Serialize;

use crate::auth::hash_password;
use crate::models::employee::{self, EmployeeDto, Entity as Employee};
use crate::models::role;
use crate::models::user::{self, Entity as User};

use super::{normalize_query, ServiceError};

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeView {
    pub id: i32,
    pub user_id: i32,
    pub login: String,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
}

impl EmployeeView {
    fn from_rows(employee: employee::Model, user: Option<user::Model>) -> Self {
        let (login, first_name, last_name) = match user {
            Some(u) => (u.login, u.first_name, u.last_name),
            None => (
                "unknown".to_string(),
                "Unknown".to_string(),
                "Unknown".to_string(),
            ),
        };

        Self {
            id: employee.id,
            user_id: employee.user_id,
            login,
            first_name,
            last_name,
            position: employee.position,
        }
    }

    fn matches(&self, q: &str) -> bool {
        self.first_name.to_lowercase().contains(q)
            || self.last_name.to_lowercase().contains(q)
            || self.position.to_lowercase().contains(q)
            || self.login.to_lowercase().contains(q)
    }
}

/// List all employees with their linked user, optionally filtered by a
/// search box value matched against first name, last name, position and
/// login.
pub async fn list_employees(
    db: &DatabaseConnection,
    query: Option<&str>,
) -> Result<Vec<EmployeeView>, ServiceError> {
    let rows = Employee::find()
        .order_by_asc(employee::Column::Id)
        .find_also_related(User)
        .all(db)
        .await?;

    let mut employees: Vec<EmployeeView> = rows
        .into_iter()
        .map(|(employee, user)| EmployeeView::from_rows(employee, user))
        .collect();

    if let Some(q) = normalize_query(query) {
        employees.retain(|e| e.matches(&q));
    }

    Ok(employees)
}

pub async fn get_employee(db: &DatabaseConnection, id: i32) -> Result<EmployeeView, ServiceError> {
    let (employee, user) = Employee::find_by_id(id)
        .find_also_related(User)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    Ok(EmployeeView::from_rows(employee, user))
}

/// Create an employee together with its backing user account (manager role).
pub async fn create_employee(
    db: &DatabaseConnection,
    dto: EmployeeDto,
) -> Result<EmployeeView, ServiceError> {
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
        role_id: Set(role::MANAGER),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let employee = employee::ActiveModel {
        user_id: Set(user.id),
        position: Set(dto.position),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    Ok(EmployeeView::from_rows(employee, Some(user)))
}

/// Update an employee and the name fields of its user account.
pub async fn update_employee(
    db: &DatabaseConnection,
    dto: EmployeeDto,
) -> Result<EmployeeView, ServiceError> {
    let id = dto.id.ok_or_else(|| {
        ServiceError::Validation("Employee ID is required for update".to_string())
    })?;

    let (employee, user) = Employee::find_by_id(id)
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

    let mut active: employee::ActiveModel = employee.into();
    active.position = Set(dto.position);
    active.updated_at = Set(now);
    let updated_employee = active.update(&txn).await?;

    txn.commit().await?;

    Ok(EmployeeView::from_rows(updated_employee, updated_user))
}

/// Look up the employee record for an authenticated user, if any.
pub async fn find_by_user(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Option<employee::Model>, ServiceError> {
    Ok(Employee::find()
        .filter(employee::Column::UserId.eq(user_id))
        .one(db)
        .await?)
}
