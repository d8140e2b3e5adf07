use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use autorental::api;
use autorental::auth;
use autorental::db;
use autorental::models::{car, car_status};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tower::util::ServiceExt; // for `oneshot`

async fn setup_test_app() -> (Router, DatabaseConnection) {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    (api::api_router(db.clone()), db)
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

fn staff_token() -> String {
    auth::create_jwt("test_manager", "manager").expect("Failed to create token")
}

fn client_token() -> String {
    auth::create_jwt("test_client", "client").expect("Failed to create token")
}

#[tokio::test]
async fn test_health_needs_no_auth() {
    let (app, _db) = setup_test_app().await;

    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_management_views_require_token() {
    let (app, _db) = setup_test_app().await;

    let req = Request::builder().uri("/cars").body(Body::empty()).unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_management_views_reject_client_role() {
    let (app, _db) = setup_test_app().await;

    let req = Request::builder()
        .uri("/cars")
        .header(header::AUTHORIZATION, format!("Bearer {}", client_token()))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_get_missing_car_is_not_found() {
    let (app, _db) = setup_test_app().await;

    let req = Request::builder()
        .uri("/cars/999")
        .header(header::AUTHORIZATION, format!("Bearer {}", staff_token()))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_without_confirmation_is_rejected() {
    let (app, db) = setup_test_app().await;
    let car_id = create_test_car(&db, "A111AA77").await;

    // Without confirm=true the delete answers with the cascade preview
    let req = Request::builder()
        .uri(format!("/cars/{}", car_id))
        .method("DELETE")
        .header(header::AUTHORIZATION, format!("Bearer {}", staff_token()))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Confirmed delete goes through
    let req = Request::builder()
        .uri(format!("/cars/{}?confirm=true", car_id))
        .method("DELETE")
        .header(header::AUTHORIZATION, format!("Bearer {}", staff_token()))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The row is gone now
    let req = Request::builder()
        .uri(format!("/cars/{}", car_id))
        .header(header::AUTHORIZATION, format!("Bearer {}", staff_token()))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_portal_rejects_staff_role() {
    let (app, _db) = setup_test_app().await;

    let req = Request::builder()
        .uri("/portal/contracts")
        .header(header::AUTHORIZATION, format!("Bearer {}", staff_token()))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
