//! Business logic without the HTTP layer. Services are free async
//! functions over a `DatabaseConnection`; the axum handlers in
//! `crate::api` stay thin on top of them.

pub mod car_service;
pub mod cascade_service;
pub mod client_service;
pub mod contract_service;
pub mod employee_service;
pub mod inspection_service;

use sea_orm::{DbErr, SqlErr};
use std::fmt;

/// Error type for service operations
#[derive(Debug)]
pub enum ServiceError {
    Database(String),
    NotFound,
    /// A removal was rejected by a foreign-key constraint. The batch was
    /// rolled back; the remaining referencing rows have to be cleaned up
    /// manually before retrying.
    IntegrityViolation(String),
    InvalidState(String),
    Validation(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Database(msg) => write!(f, "Database error: {}", msg),
            ServiceError::NotFound => write!(f, "Resource not found"),
            ServiceError::IntegrityViolation(msg) => {
                write!(f, "Integrity violation: {}", msg)
            }
            ServiceError::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            ServiceError::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                ServiceError::IntegrityViolation(msg)
            }
            Some(SqlErr::UniqueConstraintViolation(msg)) => ServiceError::Validation(msg),
            _ => {
                // The driver does not classify every backend error; fall back
                // to the message, like the original inner-cause inspection.
                let msg = e.to_string();
                if msg.to_lowercase().contains("foreign key") {
                    ServiceError::IntegrityViolation(msg)
                } else {
                    ServiceError::Database(msg)
                }
            }
        }
    }
}

/// Normalizes a search box value: lowercased and trimmed, `None` when the
/// query is empty so callers can skip filtering entirely.
pub(crate) fn normalize_query(query: Option<&str>) -> Option<String> {
    let q = query?.trim().to_lowercase();
    if q.is_empty() {
        None
    } else {
        Some(q)
    }
}
