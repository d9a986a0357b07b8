use axum::Json;

use crate::models::AppMessage;

pub const GREETING: &str = "Hello from GrowEase API!";

/// Root endpoint: GET /api
#[utoipa::path(
    get,
    path = "/api",
    responses(
        (status = 200, description = "Greeting", body = AppMessage)
    ),
    tag = "App"
)]
pub async fn get_hello() -> Json<AppMessage> {
    Json(AppMessage {
        message: GREETING.to_string(),
    })
}
