use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::NewInquiry;
use crate::state::AppState;

// POST /api/inquiries
pub async fn create_inquiry(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let inquiry = validate(&payload).map_err(AppError::Validation)?;

    let inquiry_id = {
        let db = state.db.lock().unwrap();
        queries::insert_inquiry(&db, &inquiry)?
    };

    tracing::info!("created inquiry {inquiry_id}");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "inquiry_id": inquiry_id,
            "message": "Inquiry created successfully",
        })),
    ))
}

fn validate(payload: &serde_json::Value) -> Result<NewInquiry, String> {
    let name = required_text(payload, "name")?;
    let email = required_text(payload, "email")?.to_lowercase();
    let inquiry_type = required_text(payload, "inquiry_type")?;
    let message = required_text(payload, "message")?;

    if !crate::services::booking::is_valid_email(&email) {
        return Err("Invalid email format".to_string());
    }

    let contact = payload
        .get("contact")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(NewInquiry {
        name,
        email,
        contact,
        inquiry_type,
        message,
    })
}

fn required_text(payload: &serde_json::Value, field: &str) -> Result<String, String> {
    payload
        .get(field)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| format!("{field} is required"))
}
