use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingStatus};
use crate::services::booking::{self, CAPACITY_PER_DATE};
use crate::state::AppState;

#[derive(Serialize)]
pub struct BookingResponse {
    id: i64,
    name: String,
    email: String,
    contact: Option<String>,
    people: i64,
    booking_type: String,
    selected_date: Option<String>,
    estimated_price: Option<f64>,
    status: String,
    created_at: String,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        BookingResponse {
            id: b.id,
            name: b.name,
            email: b.email,
            contact: b.contact,
            people: b.people,
            booking_type: b.booking_type.as_str().to_string(),
            selected_date: b.selected_date.map(|d| d.format("%Y-%m-%d").to_string()),
            estimated_price: b.estimated_price,
            status: b.status.as_str().to_string(),
            created_at: b.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

// GET /api/bookings
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let bookings = {
        let db = state.db.lock().unwrap();
        queries::get_all_bookings(&db)?
    };

    let bookings: Vec<BookingResponse> = bookings.into_iter().map(Into::into).collect();

    Ok(Json(serde_json::json!({
        "success": true,
        "count": bookings.len(),
        "bookings": bookings,
    })))
}

// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = parse_booking_id(&id)?;

    let db = state.db.lock().unwrap();

    let booking = queries::get_booking_by_id(&db, id)?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    // A failed details read degrades to null rather than hiding the booking.
    let (details, warning) = match queries::get_booking_detail(&db, id) {
        Ok(details) => (details, None),
        Err(e) => {
            tracing::error!("failed to fetch details for booking {id}: {e}");
            (None, Some("Booking found but details could not be retrieved"))
        }
    };

    let mut body = serde_json::json!({
        "success": true,
        "booking": BookingResponse::from(booking),
        "details": details,
    });
    if let Some(warning) = warning {
        body["warning"] = serde_json::Value::String(warning.to_string());
    }

    Ok(Json(body))
}

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let booking_id = {
        let mut db = state.db.lock().unwrap();
        booking::create_booking(&mut db, &payload)?
    };

    tracing::info!("created booking {booking_id}");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "booking_id": booking_id,
        })),
    ))
}

// PATCH /api/bookings/:id/status
#[derive(Deserialize)]
pub struct StatusUpdateRequest {
    pub status: Option<String>,
}

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<StatusUpdateRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = parse_booking_id(&id)?;

    let status = body
        .status
        .as_deref()
        .and_then(BookingStatus::parse)
        .ok_or_else(|| {
            AppError::Validation(
                "Invalid status. Must be one of: pending, contacted, confirmed, cancelled"
                    .to_string(),
            )
        })?;

    let updated = {
        let db = state.db.lock().unwrap();
        queries::update_booking_status(&db, id, status)?
    };

    if !updated {
        return Err(AppError::NotFound("Booking not found".to_string()));
    }

    Ok(Json(serde_json::json!({
        "success": true,
        "status": status.as_str(),
    })))
}

// GET /api/bookings/availability?date=YYYY-MM-DD
#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<String>,
}

pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let raw = query.date.ok_or_else(|| {
        AppError::Validation("Date parameter is required (format: YYYY-MM-DD)".to_string())
    })?;

    let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format. Use YYYY-MM-DD".to_string()))?;

    let confirmed_count = {
        let db = state.db.lock().unwrap();
        queries::count_confirmed_on_date(&db, date)?
    };

    Ok(Json(serde_json::json!({
        "success": true,
        "date": date.format("%Y-%m-%d").to_string(),
        "confirmed_count": confirmed_count,
        "capacity": CAPACITY_PER_DATE,
        "available": confirmed_count < CAPACITY_PER_DATE,
    })))
}

// PUT /api/bookings/:id — known gap, acknowledged rather than failed
pub async fn update_booking(Path(id): Path<String>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Update booking - to be implemented",
        "id": id,
    }))
}

// DELETE /api/bookings/:id — known gap, acknowledged rather than failed
pub async fn delete_booking(Path(id): Path<String>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Delete booking - to be implemented",
        "id": id,
    }))
}

fn parse_booking_id(raw: &str) -> Result<i64, AppError> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(AppError::Validation("Invalid booking ID".to_string())),
    }
}
