//! Car management - list/search/create/update. Deletion goes through
//! `cascade_service`.

use sea_orm::*;
use serde::Serialize;

use crate::models::car::{self, CarDto, Entity as Car};
use crate::models::car_status::{self, Entity as CarStatus};

use super::{normalize_query, ServiceError};

/// Car with its status name resolved, as shown in the management view.
#[derive(Debug, Clone, Serialize)]
pub struct CarView {
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub plate_number: String,
    pub color: String,
    pub year: i32,
    pub price_per_day: f64,
    pub status_id: i32,
    pub status: String,
}

impl CarView {
    fn from_row(car: car::Model, status: Option<car_status::Model>) -> Self {
        Self {
            id: car.id,
            brand: car.brand,
            model: car.model,
            plate_number: car.plate_number,
            color: car.color,
            year: car.year,
            price_per_day: car.price_per_day,
            status_id: car.status_id,
            status: status
                .map(|s| s.name)
                .unwrap_or_else(|| "unknown".to_string()),
        }
    }

    fn matches(&self, q: &str) -> bool {
        self.brand.to_lowercase().contains(q)
            || self.model.to_lowercase().contains(q)
            || self.plate_number.to_lowercase().contains(q)
            || self.color.to_lowercase().contains(q)
    }
}

/// List all cars, optionally filtered by a search box value. The filter is
/// a case-insensitive substring match over brand, model, plate and color,
/// applied to the loaded collection; an empty query returns everything.
pub async fn list_cars(
    db: &DatabaseConnection,
    query: Option<&str>,
) -> Result<Vec<CarView>, ServiceError> {
    let rows = Car::find()
        .order_by_asc(car::Column::Id)
        .find_also_related(CarStatus)
        .all(db)
        .await?;

    let mut cars: Vec<CarView> = rows
        .into_iter()
        .map(|(car, status)| CarView::from_row(car, status))
        .collect();

    if let Some(q) = normalize_query(query) {
        cars.retain(|c| c.matches(&q));
    }

    Ok(cars)
}

pub async fn get_car(db: &DatabaseConnection, id: i32) -> Result<CarView, ServiceError> {
    let (car, status) = Car::find_by_id(id)
        .find_also_related(CarStatus)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    Ok(CarView::from_row(car, status))
}

pub async fn create_car(db: &DatabaseConnection, dto: CarDto) -> Result<car::Model, ServiceError> {
    let now = chrono::Utc::now().to_rfc3339();

    let new_car = car::ActiveModel {
        brand: Set(dto.brand),
        model: Set(dto.model),
        plate_number: Set(dto.plate_number),
        color: Set(dto.color),
        year: Set(dto.year),
        price_per_day: Set(dto.price_per_day),
        status_id: Set(dto.status_id.unwrap_or(car_status::FREE)),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(new_car.insert(db).await?)
}

pub async fn update_car(db: &DatabaseConnection, dto: CarDto) -> Result<car::Model, ServiceError> {
    let id = dto.id.ok_or_else(|| {
        ServiceError::Validation("Car ID is required for update".to_string())
    })?;

    let car = Car::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let mut active_model: car::ActiveModel = car.into();
    active_model.brand = Set(dto.brand);
    active_model.model = Set(dto.model);
    active_model.plate_number = Set(dto.plate_number);
    active_model.color = Set(dto.color);
    active_model.year = Set(dto.year);
    active_model.price_per_day = Set(dto.price_per_day);
    if let Some(status_id) = dto.status_id {
        active_model.status_id = Set(status_id);
    }
    active_model.updated_at = Set(chrono::Utc::now().to_rfc3339());

    Ok(active_model.update(db).await?)
}
