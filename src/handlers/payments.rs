//! Payment endpoints are placeholders until the gateway integration lands.
//! They acknowledge instead of failing so clients can probe the surface.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;

// GET /api/payments
pub async fn list_payments() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Get all payments - to be implemented" }))
}

// GET /api/payments/:id
pub async fn get_payment(Path(id): Path<String>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Get payment by ID - to be implemented",
        "id": id,
    }))
}

// POST /api/payments
pub async fn create_payment() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "Create payment - to be implemented" })),
    )
}

// PUT /api/payments/:id
pub async fn update_payment(Path(id): Path<String>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Update payment - to be implemented",
        "id": id,
    }))
}

// DELETE /api/payments/:id
pub async fn delete_payment(Path(id): Path<String>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Delete payment - to be implemented",
        "id": id,
    }))
}
