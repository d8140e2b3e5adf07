use autorental::db;
use autorental::models::{car, car_status, client, employee, role, user};
use autorental::services::{car_service, client_service, employee_service};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

async fn create_test_user(
    db: &DatabaseConnection,
    login: &str,
    first_name: &str,
    last_name: &str,
    role_id: i32,
) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let new_user = user::ActiveModel {
        login: Set(login.to_string()),
        password_hash: Set("dummy_hash".to_string()),
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        role_id: Set(role_id),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    new_user.insert(db).await.expect("Failed to create user").id
}

async fn create_test_car(
    db: &DatabaseConnection,
    brand: &str,
    model: &str,
    plate: &str,
    color: &str,
) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let new_car = car::ActiveModel {
        brand: Set(brand.to_string()),
        model: Set(model.to_string()),
        plate_number: Set(plate.to_string()),
        color: Set(color.to_string()),
        year: Set(2020),
        price_per_day: Set(50.0),
        status_id: Set(car_status::FREE),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    new_car.insert(db).await.expect("Failed to create car").id
}

async fn create_test_client(
    db: &DatabaseConnection,
    user_id: i32,
    phone: &str,
    email: Option<&str>,
) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let new_client = client::ActiveModel {
        user_id: Set(user_id),
        passport_number: Set("4510 000000".to_string()),
        driver_license_number: Set("77 XX 000000".to_string()),
        phone: Set(phone.to_string()),
        email: Set(email.map(|e| e.to_string())),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    new_client
        .insert(db)
        .await
        .expect("Failed to create client")
        .id
}

async fn create_test_employee(db: &DatabaseConnection, user_id: i32, position: &str) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let new_employee = employee::ActiveModel {
        user_id: Set(user_id),
        position: Set(position.to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    new_employee
        .insert(db)
        .await
        .expect("Failed to create employee")
        .id
}

#[tokio::test]
async fn test_car_search_is_case_insensitive_substring() {
    let db = setup_test_db().await;

    create_test_car(&db, "Toyota", "Camry", "A123BC77", "black").await;
    create_test_car(&db, "Kia", "Rio", "B456DE77", "white").await;
    create_test_car(&db, "BMW", "X5", "C789FG77", "Black metallic").await;

    // Substring of a brand, wrong case
    let hits = car_service::list_cars(&db, Some("toyo")).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].brand, "Toyota");

    // Color matches two cars regardless of case
    let hits = car_service::list_cars(&db, Some("BLACK")).await.unwrap();
    assert_eq!(hits.len(), 2);

    // Plate fragment
    let hits = car_service::list_cars(&db, Some("456de")).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].model, "Rio");

    // No match
    let hits = car_service::list_cars(&db, Some("mercedes")).await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn test_empty_query_returns_full_set() {
    let db = setup_test_db().await;

    create_test_car(&db, "Toyota", "Camry", "A123BC77", "black").await;
    create_test_car(&db, "Kia", "Rio", "B456DE77", "white").await;

    let all = car_service::list_cars(&db, None).await.unwrap();
    assert_eq!(all.len(), 2);

    let all = car_service::list_cars(&db, Some("")).await.unwrap();
    assert_eq!(all.len(), 2);

    // Whitespace-only behaves like empty
    let all = car_service::list_cars(&db, Some("   ")).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_client_search_fields_and_null_email() {
    let db = setup_test_db().await;

    let u1 = create_test_user(&db, "ivanov", "Ivan", "Ivanov", role::CLIENT).await;
    create_test_client(&db, u1, "+7 900 111-11-11", Some("ivanov@example.com")).await;

    let u2 = create_test_user(&db, "petrov", "Pyotr", "Petrov", role::CLIENT).await;
    create_test_client(&db, u2, "+7 900 222-22-22", None).await;

    // Last name, case-insensitive
    let hits = client_service::list_clients(&db, Some("ivan")).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].last_name, "Ivanov");

    // Phone fragment
    let hits = client_service::list_clients(&db, Some("222-22")).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].last_name, "Petrov");

    // Email fragment only matches the client that has one
    let hits = client_service::list_clients(&db, Some("example.com")).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].last_name, "Ivanov");

    // Login is not part of the client search field set
    let hits = client_service::list_clients(&db, Some("petrov")).await.unwrap();
    assert_eq!(hits.len(), 1, "matched via last name, not login");
}

#[tokio::test]
async fn test_employee_search_by_position_and_login() {
    let db = setup_test_db().await;

    let u1 = create_test_user(&db, "msorokina", "Maria", "Sorokina", role::MANAGER).await;
    create_test_employee(&db, u1, "Rental manager").await;

    let u2 = create_test_user(&db, "vadams", "Victor", "Adams", role::ADMIN).await;
    create_test_employee(&db, u2, "Administrator").await;

    let hits = employee_service::list_employees(&db, Some("rental")).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].last_name, "Sorokina");

    // Login is part of the employee search field set
    let hits = employee_service::list_employees(&db, Some("vadams")).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].last_name, "Adams");

    let all = employee_service::list_employees(&db, None).await.unwrap();
    assert_eq!(all.len(), 2);
}
