use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A payment row. The HTTP surface for payments is still placeholder-only;
/// these accessors exist so the gateway integration can land without schema
/// churn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub booking_id: i64,
    pub stripe_session_id: Option<String>,
    pub amount: Option<f64>,
    pub currency: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub booking_id: i64,
    pub stripe_session_id: Option<String>,
    pub amount: Option<f64>,
}
