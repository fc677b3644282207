use axum::response::Html;

static BOOKING_HTML: &str = include_str!("../web/booking.html");

pub async fn booking_page() -> Html<&'static str> {
    Html(BOOKING_HTML)
}
