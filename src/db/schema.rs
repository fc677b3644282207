use anyhow::Context;
use rusqlite::Connection;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS bookings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    contact TEXT,
    people INTEGER NOT NULL,
    booking_type TEXT NOT NULL CHECK(booking_type IN ('regional', 'specialized', 'customized')),
    selected_date DATE,
    estimated_price DECIMAL(10, 2),
    status TEXT NOT NULL DEFAULT 'pending' CHECK(status IN ('pending', 'contacted', 'confirmed', 'cancelled')),
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS booking_details (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    booking_id INTEGER NOT NULL REFERENCES bookings(id),
    details_json TEXT NOT NULL,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS inquiries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    contact TEXT,
    inquiry_type TEXT NOT NULL,
    message TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'new',
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS payments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    booking_id INTEGER NOT NULL REFERENCES bookings(id),
    stripe_session_id TEXT,
    amount DECIMAL(10, 2),
    currency TEXT NOT NULL DEFAULT 'USD',
    status TEXT NOT NULL DEFAULT 'pending',
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_bookings_status ON bookings(status);
CREATE INDEX IF NOT EXISTS idx_bookings_booking_type ON bookings(booking_type);
CREATE INDEX IF NOT EXISTS idx_bookings_selected_date ON bookings(selected_date);
CREATE INDEX IF NOT EXISTS idx_bookings_created_at ON bookings(created_at);
CREATE INDEX IF NOT EXISTS idx_booking_details_booking_id ON booking_details(booking_id);
";

/// Create the schema on first start, otherwise run the one-time status
/// constraint rebuild if the bookings table still predates the 'contacted'
/// status. A failed rebuild is logged but never aborts startup.
pub fn ensure_schema(conn: &mut Connection) -> anyhow::Result<()> {
    match bookings_table_sql(conn)? {
        None => {
            conn.execute_batch(SCHEMA_SQL)
                .context("failed to initialize database schema")?;
            tracing::info!("database schema initialized");
        }
        Some(sql) => {
            tracing::debug!("database schema already initialized");
            if !sql.contains("'contacted'") {
                if let Err(e) = rebuild_bookings_status(conn) {
                    // Non-fatal: the old constraint still accepts every status
                    // except 'contacted', so the service can limp along.
                    tracing::error!("bookings status migration failed: {e:#}");
                }
            }
        }
    }
    Ok(())
}

fn bookings_table_sql(conn: &Connection) -> anyhow::Result<Option<String>> {
    let result = conn.query_row(
        "SELECT sql FROM sqlite_master WHERE type='table' AND name='bookings'",
        [],
        |row| row.get::<_, Option<String>>(0),
    );

    match result {
        Ok(sql) => Ok(sql),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e).context("failed to read bookings table definition"),
    }
}

/// SQLite cannot alter an inline CHECK constraint, so the table is rebuilt:
/// create a shadow table with the widened status enumeration, copy every row
/// (ids included), swap it into place and recreate the indexes, all in one
/// transaction.
fn rebuild_bookings_status(conn: &mut Connection) -> anyhow::Result<()> {
    tracing::info!("migrating bookings table to include 'contacted' status");

    let tx = conn
        .transaction()
        .context("failed to begin migration transaction")?;

    tx.execute_batch(
        "
        CREATE TABLE bookings_new (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            contact TEXT,
            people INTEGER NOT NULL,
            booking_type TEXT NOT NULL CHECK(booking_type IN ('regional', 'specialized', 'customized')),
            selected_date DATE,
            estimated_price DECIMAL(10, 2),
            status TEXT NOT NULL DEFAULT 'pending' CHECK(status IN ('pending', 'contacted', 'confirmed', 'cancelled')),
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );

        INSERT INTO bookings_new (id, name, email, contact, people, booking_type, selected_date, estimated_price, status, created_at)
        SELECT id, name, email, contact, people, booking_type, selected_date, estimated_price, status, created_at
        FROM bookings;

        DROP TABLE bookings;
        ALTER TABLE bookings_new RENAME TO bookings;

        CREATE INDEX IF NOT EXISTS idx_bookings_status ON bookings(status);
        CREATE INDEX IF NOT EXISTS idx_bookings_booking_type ON bookings(booking_type);
        CREATE INDEX IF NOT EXISTS idx_bookings_selected_date ON bookings(selected_date);
        CREATE INDEX IF NOT EXISTS idx_bookings_created_at ON bookings(created_at);
        ",
    )
    .context("failed to rebuild bookings table")?;

    tx.commit().context("failed to commit bookings rebuild")?;

    tracing::info!("bookings table migration completed");
    Ok(())
}
