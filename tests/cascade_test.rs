use autorental::db;
use autorental::models::{car, car_inspection, car_status, client, employee, rental_contract, role, user};
use autorental::services::{cascade_service, ServiceError};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set, Statement,
};

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    // In-memory SQLite for testing
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

async fn create_test_user(db: &DatabaseConnection, login: &str, role_id: i32) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let new_user = user::ActiveModel {
        login: Set(login.to_string()),
        password_hash: Set("dummy_hash".to_string()),
        first_name: Set("Test".to_string()),
        last_name: Set("Person".to_string()),
        role_id: Set(role_id),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    new_user.insert(db).await.expect("Failed to create user").id
}

async fn create_test_client(db: &DatabaseConnection, user_id: i32) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let new_client = client::ActiveModel {
        user_id: Set(user_id),
        passport_number: Set("4510 000000".to_string()),
        driver_license_number: Set("77 XX 000000".to_string()),
        phone: Set("+7 900 000-00-00".to_string()),
        email: Set(None),
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

async fn create_test_employee(db: &DatabaseConnection, user_id: i32) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let new_employee = employee::ActiveModel {
        user_id: Set(user_id),
        position: Set("Rental manager".to_string()),
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

async fn create_test_car(db: &DatabaseConnection, plate: &str) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let new_car = car::ActiveModel {
        brand: Set("Toyota".to_string()),
        model: Set("Camry".to_string()),
        plate_number: Set(plate.to_string()),
        color: Set("black".to_string()),
        year: Set(2021),
        price_per_day: Set(65.0),
        status_id: Set(car_status::FREE),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    new_car.insert(db).await.expect("Failed to create car").id
}

async fn create_test_contract(
    db: &DatabaseConnection,
    number: &str,
    car_id: i32,
    client_id: i32,
    manager_id: i32,
) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let new_contract = rental_contract::ActiveModel {
        contract_number: Set(number.to_string()),
        car_id: Set(car_id),
        client_id: Set(client_id),
        manager_id: Set(manager_id),
        start_date: Set("2025-06-01".to_string()),
        planned_end_date: Set("2025-06-10".to_string()),
        actual_end_date: Set(None),
        status_id: Set(1),
        total_amount: Set(585.0),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    new_contract
        .insert(db)
        .await
        .expect("Failed to create contract")
        .id
}

async fn create_test_inspection(db: &DatabaseConnection, contract_id: i32) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let new_inspection = car_inspection::ActiveModel {
        contract_id: Set(contract_id),
        inspection_type: Set("handover".to_string()),
        inspection_date: Set("2025-06-01".to_string()),
        notes: Set("No damage".to_string()),
        damage_cost: Set(0.0),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    new_inspection
        .insert(db)
        .await
        .expect("Failed to create inspection")
        .id
}

#[tokio::test]
async fn test_delete_car_removes_contracts_and_inspections() {
    let db = setup_test_db().await;

    let client_user = create_test_user(&db, "client1", role::CLIENT).await;
    let client_id = create_test_client(&db, client_user).await;
    let manager_user = create_test_user(&db, "manager1", role::MANAGER).await;
    let manager_id = create_test_employee(&db, manager_user).await;

    let car_id = create_test_car(&db, "A111AA77").await;
    let other_car_id = create_test_car(&db, "B222BB77").await;

    // Two contracts on the target car: 2 + 1 inspections
    let c1 = create_test_contract(&db, "RC-1", car_id, client_id, manager_id).await;
    let c2 = create_test_contract(&db, "RC-2", car_id, client_id, manager_id).await;
    create_test_inspection(&db, c1).await;
    create_test_inspection(&db, c1).await;
    create_test_inspection(&db, c2).await;

    // One contract with an inspection on an unrelated car
    let other_contract = create_test_contract(&db, "RC-3", other_car_id, client_id, manager_id).await;
    create_test_inspection(&db, other_contract).await;

    let outcome = cascade_service::delete_car(&db, car_id)
        .await
        .expect("cascade failed");

    assert_eq!(outcome.contracts_removed, 2);
    assert_eq!(outcome.inspections_removed, 3);
    assert!(!outcome.user_removed);

    assert!(car::Entity::find_by_id(car_id).one(&db).await.unwrap().is_none());
    assert_eq!(
        rental_contract::Entity::find()
            .filter(rental_contract::Column::CarId.eq(car_id))
            .count(&db)
            .await
            .unwrap(),
        0
    );

    // The unrelated car keeps its contract and inspection
    assert!(car::Entity::find_by_id(other_car_id).one(&db).await.unwrap().is_some());
    assert_eq!(rental_contract::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(car_inspection::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_client_removes_linked_user() {
    let db = setup_test_db().await;

    let client_user = create_test_user(&db, "client1", role::CLIENT).await;
    let client_id = create_test_client(&db, client_user).await;
    let manager_user = create_test_user(&db, "manager1", role::MANAGER).await;
    let manager_id = create_test_employee(&db, manager_user).await;
    let car_id = create_test_car(&db, "A111AA77").await;

    let contract = create_test_contract(&db, "RC-1", car_id, client_id, manager_id).await;
    create_test_inspection(&db, contract).await;

    let outcome = cascade_service::delete_client(&db, client_id)
        .await
        .expect("cascade failed");

    assert_eq!(outcome.contracts_removed, 1);
    assert_eq!(outcome.inspections_removed, 1);
    assert!(outcome.user_removed);

    assert!(client::Entity::find_by_id(client_id).one(&db).await.unwrap().is_none());
    assert!(user::Entity::find_by_id(client_user).one(&db).await.unwrap().is_none());

    // The manager's user account is untouched
    assert!(user::Entity::find_by_id(manager_user).one(&db).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_client_without_user_removes_no_user_rows() {
    let db = setup_test_db().await;

    let client_user = create_test_user(&db, "client1", role::CLIENT).await;
    let client_id = create_test_client(&db, client_user).await;

    // Orphan the client: its user row disappears out from under it
    user::Entity::delete_by_id(client_user)
        .exec(&db)
        .await
        .expect("Failed to delete user");

    let users_before = user::Entity::find().count(&db).await.unwrap();

    let outcome = cascade_service::delete_client(&db, client_id)
        .await
        .expect("cascade failed");

    assert!(!outcome.user_removed);
    assert_eq!(user::Entity::find().count(&db).await.unwrap(), users_before);
    assert!(client::Entity::find_by_id(client_id).one(&db).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_employee_with_no_contracts() {
    let db = setup_test_db().await;

    let manager_user = create_test_user(&db, "manager1", role::MANAGER).await;
    let manager_id = create_test_employee(&db, manager_user).await;

    let client_user = create_test_user(&db, "client1", role::CLIENT).await;
    let client_id = create_test_client(&db, client_user).await;
    let car_id = create_test_car(&db, "A111AA77").await;

    let outcome = cascade_service::delete_employee(&db, manager_id)
        .await
        .expect("cascade failed");

    assert_eq!(outcome.contracts_removed, 0);
    assert_eq!(outcome.inspections_removed, 0);
    assert!(!outcome.user_removed);

    assert!(employee::Entity::find_by_id(manager_id).one(&db).await.unwrap().is_none());
    // The employee's user account is kept
    assert!(user::Entity::find_by_id(manager_user).one(&db).await.unwrap().is_some());
    // Nothing else was touched
    assert!(client::Entity::find_by_id(client_id).one(&db).await.unwrap().is_some());
    assert!(car::Entity::find_by_id(car_id).one(&db).await.unwrap().is_some());
}

#[tokio::test]
async fn test_failed_cascade_leaves_database_unchanged() {
    let db = setup_test_db().await;

    let client_user = create_test_user(&db, "client1", role::CLIENT).await;
    let client_id = create_test_client(&db, client_user).await;
    let manager_user = create_test_user(&db, "manager1", role::MANAGER).await;
    let manager_id = create_test_employee(&db, manager_user).await;
    let car_id = create_test_car(&db, "A111AA77").await;

    let contract = create_test_contract(&db, "RC-1", car_id, client_id, manager_id).await;
    create_test_inspection(&db, contract).await;

    // A table the cascade does not know about keeps a reference to the
    // contract, so the contract delete must be rejected mid-batch.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE contract_audit (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            contract_id INTEGER NOT NULL REFERENCES rental_contracts(id)
        )
        "#
        .to_owned(),
    ))
    .await
    .expect("Failed to create audit table");

    db.execute(Statement::from_string(
        db.get_database_backend(),
        format!("INSERT INTO contract_audit (contract_id) VALUES ({})", contract),
    ))
    .await
    .expect("Failed to insert audit row");

    let err = cascade_service::delete_car(&db, car_id)
        .await
        .expect_err("cascade should have failed");

    assert!(
        matches!(err, ServiceError::IntegrityViolation(_)),
        "expected integrity violation, got {:?}",
        err
    );

    // No partial removals persisted
    assert!(car::Entity::find_by_id(car_id).one(&db).await.unwrap().is_some());
    assert_eq!(rental_contract::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(car_inspection::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_cascade_preview_matches_outcome() {
    let db = setup_test_db().await;

    let client_user = create_test_user(&db, "client1", role::CLIENT).await;
    let client_id = create_test_client(&db, client_user).await;
    let manager_user = create_test_user(&db, "manager1", role::MANAGER).await;
    let manager_id = create_test_employee(&db, manager_user).await;
    let car_id = create_test_car(&db, "A111AA77").await;

    let c1 = create_test_contract(&db, "RC-1", car_id, client_id, manager_id).await;
    create_test_inspection(&db, c1).await;
    create_test_inspection(&db, c1).await;

    let preview = cascade_service::preview_client(&db, client_id)
        .await
        .expect("preview failed");
    assert_eq!(preview.contracts, 1);
    assert_eq!(preview.inspections, 2);
    assert!(preview.removes_user);

    let outcome = cascade_service::delete_client(&db, client_id)
        .await
        .expect("cascade failed");
    assert_eq!(outcome.contracts_removed, preview.contracts);
    assert_eq!(outcome.inspections_removed, preview.inspections);
    assert_eq!(outcome.user_removed, preview.removes_user);
}

#[tokio::test]
async fn test_preview_of_missing_root_is_not_found() {
    let db = setup_test_db().await;

    let err = cascade_service::preview_car(&db, 999)
        .await
        .expect_err("preview should have failed");
    assert!(matches!(err, ServiceError::NotFound));

    let err = cascade_service::delete_employee(&db, 999)
        .await
        .expect_err("delete should have failed");
    assert!(matches!(err, ServiceError::NotFound));
}
