use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Reference tables first: roles and status catalogs
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS roles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        INSERT OR IGNORE INTO roles (id, name)
        VALUES (1, 'admin'), (2, 'manager'), (3, 'client')
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS car_statuses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        INSERT OR IGNORE INTO car_statuses (id, name)
        VALUES (1, 'free'), (2, 'rented'), (3, 'maintenance')
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS contract_statuses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        INSERT OR IGNORE INTO contract_statuses (id, name)
        VALUES (1, 'active'), (2, 'completed'), (3, 'cancelled')
        "#
        .to_owned(),
    ))
    .await?;

    // Create users table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            login TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            role_id INTEGER NOT NULL REFERENCES roles(id),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Create clients table (one user per client). user_id is maintained by
    // the delete cascade rather than the schema: a client row can outlive
    // its user row until both are swept together.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS clients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL UNIQUE,
            passport_number TEXT NOT NULL,
            driver_license_number TEXT NOT NULL,
            phone TEXT NOT NULL,
            email TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Create employees table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL UNIQUE REFERENCES users(id),
            position TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Create cars table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS cars (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            brand TEXT NOT NULL,
            model TEXT NOT NULL,
            plate_number TEXT NOT NULL UNIQUE,
            color TEXT NOT NULL,
            year INTEGER NOT NULL,
            price_per_day REAL NOT NULL,
            status_id INTEGER NOT NULL DEFAULT 1 REFERENCES car_statuses(id),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Create rental_contracts table. Deletion of cars/clients/employees is
    // handled by the application-level cascade, so the FKs restrict.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS rental_contracts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            contract_number TEXT NOT NULL UNIQUE,
            car_id INTEGER NOT NULL REFERENCES cars(id),
            client_id INTEGER NOT NULL REFERENCES clients(id),
            manager_id INTEGER NOT NULL REFERENCES employees(id),
            start_date TEXT NOT NULL,
            planned_end_date TEXT NOT NULL,
            actual_end_date TEXT,
            status_id INTEGER NOT NULL DEFAULT 1 REFERENCES contract_statuses(id),
            total_amount REAL NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Create car_inspections table. contract_id is intentionally not
    // FK-enforced: deleting a single contract leaves its inspections behind
    // (see contract_service::delete_contract); only the root cascades keep
    // this table consistent.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS car_inspections (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            contract_id INTEGER NOT NULL,
            inspection_type TEXT NOT NULL,
            inspection_date TEXT NOT NULL,
            notes TEXT NOT NULL,
            damage_cost REAL NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_car_inspections_contract ON car_inspections(contract_id)"
            .to_owned(),
    ))
    .await?;

    // Migration: inspections used to record mileage, replaced by damage_cost.
    // We attempt to add the column; on databases created after the rename it
    // already exists and the statement fails, so we ignore errors.
    let _ = db
        .execute(Statement::from_string(
            db.get_database_backend(),
            "ALTER TABLE car_inspections ADD COLUMN damage_cost REAL NOT NULL DEFAULT 0".to_owned(),
        ))
        .await;

    Ok(())
}
