use crate::auth::hash_password;
use crate::models::{
    car, car_inspection, car_status, client, contract_status, employee, rental_contract, role,
    user,
};
use sea_orm::*;

async fn ensure_user(
    db: &DatabaseConnection,
    login: &str,
    password: &str,
    first_name: &str,
    last_name: &str,
    role_id: i32,
) -> Result<user::Model, DbErr> {
    if let Some(existing) = user::Entity::find()
        .filter(user::Column::Login.eq(login))
        .one(db)
        .await?
    {
        return Ok(existing);
    }

    let now = chrono::Utc::now().to_rfc3339();
    let password_hash = hash_password(password).unwrap();

    user::ActiveModel {
        login: Set(login.to_owned()),
        password_hash: Set(password_hash),
        first_name: Set(first_name.to_owned()),
        last_name: Set(last_name.to_owned()),
        role_id: Set(role_id),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = chrono::Utc::now().to_rfc3339();

    // 1. Users
    let admin = ensure_user(db, "admin", "admin", "Victor", "Adams", role::ADMIN).await?;
    let manager = ensure_user(db, "manager", "manager", "Maria", "Sorokina", role::MANAGER).await?;
    let client_user = ensure_user(db, "ivanov", "client", "Ivan", "Ivanov", role::CLIENT).await?;

    // 2. Staff records
    for (user_id, position) in [(admin.id, "Administrator"), (manager.id, "Rental manager")] {
        let exists = employee::Entity::find()
            .filter(employee::Column::UserId.eq(user_id))
            .one(db)
            .await?
            .is_some();
        if !exists {
            employee::ActiveModel {
                user_id: Set(user_id),
                position: Set(position.to_owned()),
                created_at: Set(now.clone()),
                updated_at: Set(now.clone()),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
    }

    // 3. Client record
    let client = match client::Entity::find()
        .filter(client::Column::UserId.eq(client_user.id))
        .one(db)
        .await?
    {
        Some(c) => c,
        None => {
            client::ActiveModel {
                user_id: Set(client_user.id),
                passport_number: Set("4510 123456".to_owned()),
                driver_license_number: Set("77 AB 987654".to_owned()),
                phone: Set("+7 900 123-45-67".to_owned()),
                email: Set(Some("ivanov@example.com".to_owned())),
                created_at: Set(now.clone()),
                updated_at: Set(now.clone()),
                ..Default::default()
            }
            .insert(db)
            .await?
        }
    };

    // 4. Cars
    let cars = [
        ("Toyota", "Camry", "A123BC77", "black", 2021, 65.0),
        ("Kia", "Rio", "B456DE77", "white", 2019, 35.0),
        ("BMW", "X5", "C789FG77", "blue", 2022, 120.0),
    ];

    for (brand, model, plate, color, year, price) in cars {
        let new_car = car::ActiveModel {
            brand: Set(brand.to_owned()),
            model: Set(model.to_owned()),
            plate_number: Set(plate.to_owned()),
            color: Set(color.to_owned()),
            year: Set(year),
            price_per_day: Set(price),
            status_id: Set(car_status::FREE),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        car::Entity::insert(new_car)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(car::Column::PlateNumber)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(db)
            .await?;
    }

    // 5. One rented car with a contract and its handover inspection
    let already_seeded = rental_contract::Entity::find().count(db).await? > 0;
    if already_seeded {
        return Ok(());
    }

    let rented_car = car::Entity::find()
        .filter(car::Column::PlateNumber.eq("A123BC77"))
        .one(db)
        .await?
        .expect("seeded car exists");

    let manager_employee = employee::Entity::find()
        .filter(employee::Column::UserId.eq(manager.id))
        .one(db)
        .await?
        .expect("seeded employee exists");

    let contract = rental_contract::ActiveModel {
        contract_number: Set("RC-DEMO-0001".to_owned()),
        car_id: Set(rented_car.id),
        client_id: Set(client.id),
        manager_id: Set(manager_employee.id),
        start_date: Set("2025-06-01".to_owned()),
        planned_end_date: Set("2025-06-10".to_owned()),
        actual_end_date: Set(None),
        status_id: Set(contract_status::ACTIVE),
        total_amount: Set(585.0),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    car_inspection::ActiveModel {
        contract_id: Set(contract.id),
        inspection_type: Set("handover".to_owned()),
        inspection_date: Set("2025-06-01".to_owned()),
        notes: Set("No visible damage at handover".to_owned()),
        damage_cost: Set(0.0),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let mut rented: car::ActiveModel = rented_car.into();
    rented.status_id = Set(car_status::RENTED);
    rented.updated_at = Set(now);
    rented.update(db).await?;

    Ok(())
}
