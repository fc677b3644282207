use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};

use crate::models::{
    Booking, BookingStatus, BookingType, Inquiry, NewBooking, NewInquiry, NewPayment, Payment,
};

const BOOKING_COLUMNS: &str =
    "id, name, email, contact, people, booking_type, selected_date, estimated_price, status, created_at";

// ── Bookings ──

pub fn insert_booking(conn: &Connection, booking: &NewBooking) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO bookings (name, email, contact, people, booking_type, selected_date, estimated_price, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 'pending')",
        params![
            booking.name,
            booking.email,
            booking.contact,
            booking.people,
            booking.booking_type.as_str(),
            booking.selected_date.format("%Y-%m-%d").to_string(),
            booking.estimated_price,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_all_bookings(conn: &Connection) -> rusqlite::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at DESC, id DESC"
    ))?;

    let rows = stmt.query_map([], parse_booking_row)?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

pub fn get_booking_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Booking>> {
    let result = conn.query_row(
        &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"),
        params![id],
        parse_booking_row,
    );

    match result {
        Ok(booking) => Ok(Some(booking)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Returns true when a row was actually updated.
pub fn update_booking_status(
    conn: &Connection,
    id: i64,
    status: BookingStatus,
) -> rusqlite::Result<bool> {
    let count = conn.execute(
        "UPDATE bookings SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(count > 0)
}

/// Confirmed bookings on a date are the only ones that consume capacity;
/// pending and cancelled rows are excluded on purpose.
pub fn count_confirmed_on_date(conn: &Connection, date: NaiveDate) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM bookings WHERE selected_date = ?1 AND status = 'confirmed'",
        params![date.format("%Y-%m-%d").to_string()],
        |row| row.get(0),
    )
}

fn parse_booking_row(row: &rusqlite::Row) -> rusqlite::Result<Booking> {
    let booking_type_str: String = row.get(5)?;
    let selected_date_str: Option<String> = row.get(6)?;
    let status_str: String = row.get(8)?;

    Ok(Booking {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        contact: row.get(3)?,
        people: row.get(4)?,
        booking_type: BookingType::parse(&booking_type_str).unwrap_or(BookingType::Regional),
        selected_date: selected_date_str
            .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
        estimated_price: row.get(7)?,
        status: BookingStatus::parse(&status_str).unwrap_or(BookingStatus::Pending),
        created_at: read_timestamp(row, 9)?,
    })
}

/// A row whose timestamp cannot be parsed is surfaced as a conversion error
/// instead of being silently rewritten to the current time.
fn read_timestamp(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

// ── Booking details ──

pub fn insert_booking_detail(
    conn: &Connection,
    booking_id: i64,
    details: &serde_json::Value,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO booking_details (booking_id, details_json) VALUES (?1, ?2)",
        params![booking_id, details.to_string()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// The "current" detail is the most recently created row for the booking.
pub fn get_booking_detail(
    conn: &Connection,
    booking_id: i64,
) -> rusqlite::Result<Option<serde_json::Value>> {
    let result = conn.query_row(
        "SELECT details_json FROM booking_details
         WHERE booking_id = ?1 ORDER BY created_at DESC, id DESC LIMIT 1",
        params![booking_id],
        |row| row.get::<_, String>(0),
    );

    match result {
        // An unparseable payload is returned as a plain string rather than
        // dropped.
        Ok(raw) => Ok(Some(
            serde_json::from_str(&raw).unwrap_or(serde_json::Value::String(raw)),
        )),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

// ── Inquiries ──

pub fn insert_inquiry(conn: &Connection, inquiry: &NewInquiry) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO inquiries (name, email, contact, inquiry_type, message, status)
         VALUES (?1, ?2, ?3, ?4, ?5, 'new')",
        params![
            inquiry.name,
            inquiry.email,
            inquiry.contact,
            inquiry.inquiry_type,
            inquiry.message,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_all_inquiries(conn: &Connection) -> rusqlite::Result<Vec<Inquiry>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, email, contact, inquiry_type, message, status, created_at
         FROM inquiries ORDER BY created_at DESC, id DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(Inquiry {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            contact: row.get(3)?,
            inquiry_type: row.get(4)?,
            message: row.get(5)?,
            status: row.get(6)?,
            created_at: read_timestamp(row, 7)?,
        })
    })?;

    let mut inquiries = vec![];
    for row in rows {
        inquiries.push(row?);
    }
    Ok(inquiries)
}

// ── Payments ──

pub fn insert_payment(conn: &Connection, payment: &NewPayment) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO payments (booking_id, stripe_session_id, amount, currency, status)
         VALUES (?1, ?2, ?3, 'USD', 'pending')",
        params![payment.booking_id, payment.stripe_session_id, payment.amount],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_payments_for_booking(
    conn: &Connection,
    booking_id: i64,
) -> rusqlite::Result<Vec<Payment>> {
    let mut stmt = conn.prepare(
        "SELECT id, booking_id, stripe_session_id, amount, currency, status, created_at
         FROM payments WHERE booking_id = ?1 ORDER BY created_at DESC, id DESC",
    )?;

    let rows = stmt.query_map(params![booking_id], |row| {
        Ok(Payment {
            id: row.get(0)?,
            booking_id: row.get(1)?,
            stripe_session_id: row.get(2)?,
            amount: row.get(3)?,
            currency: row.get(4)?,
            status: row.get(5)?,
            created_at: read_timestamp(row, 6)?,
        })
    })?;

    let mut payments = vec![];
    for row in rows {
        payments.push(row?);
    }
    Ok(payments)
}
