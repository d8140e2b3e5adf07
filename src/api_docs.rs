use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::cars::list_cars,
        api::cars::create_car,
        api::cars::delete_car,
        // Remaining endpoints get annotated as they stabilize
    ),
    tags(
        (name = "autorental", description = "AutoRental management API")
    )
)]
pub struct ApiDoc;
