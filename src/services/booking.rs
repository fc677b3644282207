use chrono::{Datelike, NaiveDate, Utc};
use rusqlite::{Connection, TransactionBehavior};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{BookingType, NewBooking};

/// Maximum confirmed bookings a single date may hold.
pub const CAPACITY_PER_DATE: i64 = 2;

const REQUIRED_FIELDS: [&str; 5] = ["name", "email", "people", "booking_type", "selected_date"];

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Validate the raw booking payload and create the booking together with its
/// detail row. Capacity check, booking insert and detail insert run in one
/// immediate transaction so two concurrent requests cannot oversell a date
/// and a detail write can never be lost after the booking committed.
pub fn create_booking(
    conn: &mut Connection,
    payload: &serde_json::Value,
) -> Result<i64, AppError> {
    let booking = validate(payload).map_err(AppError::Validation)?;

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let confirmed = queries::count_confirmed_on_date(&tx, booking.selected_date)?;
    if confirmed >= CAPACITY_PER_DATE {
        return Err(AppError::Validation(format!(
            "This date is fully booked. Maximum capacity ({CAPACITY_PER_DATE} bookings) has been reached."
        )));
    }

    let booking_id = queries::insert_booking(&tx, &booking)?;
    queries::insert_booking_detail(&tx, booking_id, payload)?;

    tx.commit()?;
    Ok(booking_id)
}

/// Apply the validation rules in order; the first failure wins.
pub fn validate(payload: &serde_json::Value) -> Result<NewBooking, String> {
    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .filter(|field| field_is_missing(payload.get(**field)))
        .copied()
        .collect();

    if !missing.is_empty() {
        return Err(format!("Missing required fields: {}", missing.join(", ")));
    }

    let booking_type_str = text_field(payload, "booking_type");
    let Some(booking_type) = BookingType::parse(&booking_type_str) else {
        return Err(
            "Invalid booking_type. Must be one of: regional, specialized, customized".to_string(),
        );
    };

    let Some(people) = parse_people(&payload["people"]) else {
        return Err("people must be a positive integer".to_string());
    };

    let email = text_field(payload, "email").to_lowercase();
    if !is_valid_email(&email) {
        return Err("Invalid email format".to_string());
    }

    let selected_date = normalize_date(&text_field(payload, "selected_date"), Utc::now().year())
        .ok_or_else(|| "Invalid date format".to_string())?;

    let contact = payload
        .get("contact")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(NewBooking {
        name: text_field(payload, "name"),
        email,
        contact,
        people,
        booking_type,
        selected_date,
        estimated_price: payload.get("estimated_price").and_then(parse_price),
    })
}

/// Resolve a date given either as ISO `YYYY-MM-DD` or as a free-text
/// "Month Day" string against the given year. Impossible dates are rejected
/// rather than clamped.
pub fn normalize_date(raw: &str, current_year: i32) -> Option<NaiveDate> {
    let trimmed = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    let mut words = trimmed.split_whitespace();
    let month_name = words.next()?;
    let day_str = words.next()?;
    if words.next().is_some() {
        return None;
    }

    let month = MONTH_NAMES
        .iter()
        .position(|m| *m == month_name.to_lowercase())?
        + 1;
    let day: u32 = day_str.parse().ok()?;

    NaiveDate::from_ymd_opt(current_year, month as u32, day)
}

fn field_is_missing(value: Option<&serde_json::Value>) -> bool {
    match value {
        None | Some(serde_json::Value::Null) => true,
        Some(serde_json::Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn text_field(payload: &serde_json::Value, field: &str) -> String {
    payload
        .get(field)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

fn parse_people(value: &serde_json::Value) -> Option<i64> {
    let people = match value {
        serde_json::Value::Number(n) => n.as_i64()?,
        serde_json::Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    (people >= 1).then_some(people)
}

fn parse_price(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Basic `local@domain.tld` shape, not full RFC validation.
pub(crate) fn is_valid_email(s: &str) -> bool {
    let mut parts = s.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    if local.is_empty() || local.chars().any(char::is_whitespace) {
        return false;
    }
    if domain.chars().any(char::is_whitespace) {
        return false;
    }

    match domain.rfind('.') {
        Some(dot) => dot > 0 && dot + 1 < domain.len(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> serde_json::Value {
        json!({
            "name": "  Ada Lovelace ",
            "email": "Ada@Example.COM",
            "contact": " +1 555 0100 ",
            "people": 2,
            "booking_type": "regional",
            "selected_date": "2026-09-12",
            "estimated_price": "149.50"
        })
    }

    #[test]
    fn test_validate_trims_and_lowercases() {
        let booking = validate(&valid_payload()).unwrap();
        assert_eq!(booking.name, "Ada Lovelace");
        assert_eq!(booking.email, "ada@example.com");
        assert_eq!(booking.contact.as_deref(), Some("+1 555 0100"));
        assert_eq!(booking.people, 2);
        assert_eq!(booking.booking_type, BookingType::Regional);
        assert_eq!(booking.estimated_price, Some(149.50));
    }

    #[test]
    fn test_missing_fields_listed_in_order() {
        let err = validate(&json!({})).unwrap_err();
        assert_eq!(
            err,
            "Missing required fields: name, email, people, booking_type, selected_date"
        );

        let mut payload = valid_payload();
        payload["email"] = json!("   ");
        payload.as_object_mut().unwrap().remove("people");
        let err = validate(&payload).unwrap_err();
        assert_eq!(err, "Missing required fields: email, people");
    }

    #[test]
    fn test_contact_is_optional() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("contact");
        let booking = validate(&payload).unwrap();
        assert_eq!(booking.contact, None);
    }

    #[test]
    fn test_first_failure_wins() {
        // Both booking_type and email are bad; booking_type is checked first.
        let mut payload = valid_payload();
        payload["booking_type"] = json!("luxury");
        payload["email"] = json!("not-an-email");
        let err = validate(&payload).unwrap_err();
        assert!(err.starts_with("Invalid booking_type"));
    }

    #[test]
    fn test_people_must_be_positive_integer() {
        for bad in [json!(0), json!(-3), json!("zero"), json!(1.5)] {
            let mut payload = valid_payload();
            payload["people"] = bad;
            assert_eq!(
                validate(&payload).unwrap_err(),
                "people must be a positive integer"
            );
        }

        let mut payload = valid_payload();
        payload["people"] = json!("3");
        assert_eq!(validate(&payload).unwrap().people, 3);
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@signs.com"));
        assert!(!is_valid_email("@domain.com"));
        assert!(!is_valid_email("user@domain"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user@domain."));
        assert!(!is_valid_email("spaced user@domain.com"));
    }

    #[test]
    fn test_normalize_iso_date() {
        assert_eq!(
            normalize_date("2026-03-05", 2026),
            NaiveDate::from_ymd_opt(2026, 3, 5)
        );
    }

    #[test]
    fn test_normalize_month_day() {
        assert_eq!(
            normalize_date("March 5", 2026),
            NaiveDate::from_ymd_opt(2026, 3, 5)
        );
        assert_eq!(
            normalize_date("  december 31 ", 2026),
            NaiveDate::from_ymd_opt(2026, 12, 31)
        );
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert_eq!(normalize_date("Smarch 5", 2026), None);
        assert_eq!(normalize_date("March", 2026), None);
        assert_eq!(normalize_date("March five", 2026), None);
        assert_eq!(normalize_date("March 5 2027", 2026), None);
        assert_eq!(normalize_date("February 30", 2026), None);
        assert_eq!(normalize_date("", 2026), None);
    }

    #[test]
    fn test_unparseable_date_is_a_validation_error() {
        let mut payload = valid_payload();
        payload["selected_date"] = json!("someday soon");
        assert_eq!(validate(&payload).unwrap_err(), "Invalid date format");
    }
}
