use std::sync::{Arc, Mutex};

use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use tourbook::config::AppConfig;
use tourbook::db;
use tourbook::handlers;
use tourbook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
    });

    let app = Router::new()
        .route("/", get(handlers::pages::booking_page))
        .route("/health", get(handlers::health::health))
        .route(
            "/api/bookings",
            get(handlers::bookings::list_bookings).post(handlers::bookings::create_booking),
        )
        .route(
            "/api/bookings/availability",
            get(handlers::bookings::check_availability),
        )
        .route(
            "/api/bookings/:id",
            get(handlers::bookings::get_booking)
                .put(handlers::bookings::update_booking)
                .delete(handlers::bookings::delete_booking),
        )
        .route(
            "/api/bookings/:id/status",
            patch(handlers::bookings::update_status),
        )
        .route("/api/inquiries", post(handlers::inquiries::create_inquiry))
        .route(
            "/api/payments",
            get(handlers::payments::list_payments).post(handlers::payments::create_payment),
        )
        .route(
            "/api/payments/:id",
            get(handlers::payments::get_payment)
                .put(handlers::payments::update_payment)
                .delete(handlers::payments::delete_payment),
        )
        // The marketing site is served separately, so the API stays
        // cross-origin friendly.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
