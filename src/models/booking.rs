use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A booking row as persisted in the `bookings` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub contact: Option<String>,
    pub people: i64,
    pub booking_type: BookingType,
    pub selected_date: Option<NaiveDate>,
    pub estimated_price: Option<f64>,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
}

/// Validated input for creating a booking. Produced by
/// `services::booking::validate`, never built from raw request data directly.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub name: String,
    pub email: String,
    pub contact: Option<String>,
    pub people: i64,
    pub booking_type: BookingType,
    pub selected_date: NaiveDate,
    pub estimated_price: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingType {
    Regional,
    Specialized,
    Customized,
}

impl BookingType {
    pub const ALL: [BookingType; 3] = [
        BookingType::Regional,
        BookingType::Specialized,
        BookingType::Customized,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingType::Regional => "regional",
            BookingType::Specialized => "specialized",
            BookingType::Customized => "customized",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "regional" => Some(BookingType::Regional),
            "specialized" => Some(BookingType::Specialized),
            "customized" => Some(BookingType::Customized),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Contacted,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Contacted,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Contacted => "contacted",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "contacted" => Some(BookingStatus::Contacted),
            "confirmed" => Some(BookingStatus::Confirmed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}
