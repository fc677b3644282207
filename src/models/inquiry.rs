use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An inquiry row. Status starts at "new" and is only ever mutated by hand
/// (there is no status endpoint for inquiries yet).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub contact: Option<String>,
    pub inquiry_type: String,
    pub message: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewInquiry {
    pub name: String,
    pub email: String,
    pub contact: Option<String>,
    pub inquiry_type: String,
    pub message: String,
}
