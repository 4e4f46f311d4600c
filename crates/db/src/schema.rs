use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_availabilities_painter_id ON availabilities(painter_id)",
    "CREATE INDEX IF NOT EXISTS idx_availabilities_start_time ON availabilities(start_time)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_painter_date ON bookings(painter_id, date)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_customer_id ON bookings(customer_id)",
    "CREATE INDEX IF NOT EXISTS idx_users_role ON users(role)",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Needed for the equality half of the bookings exclusion constraint
    sqlx::query("CREATE EXTENSION IF NOT EXISTS btree_gist")
        .execute(pool)
        .await?;

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            email VARCHAR(255) NOT NULL UNIQUE,
            name VARCHAR(255) NOT NULL,
            role VARCHAR(16) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_role CHECK (role IN ('customer', 'painter'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create painters table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS painters (
            user_id BIGINT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
            rating DOUBLE PRECISION NOT NULL DEFAULT 0,
            specialization VARCHAR(255) NOT NULL DEFAULT '',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_rating CHECK (rating >= 0 AND rating <= 5)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create availabilities table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS availabilities (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            painter_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table. Active bookings of one painter may not overlap.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            painter_id BIGINT NOT NULL REFERENCES users(id),
            customer_id BIGINT NOT NULL REFERENCES users(id),
            date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'pending',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_booking_range CHECK (end_time > start_time),
            CONSTRAINT valid_status CHECK (status IN ('pending', 'confirmed', 'completed', 'cancelled')),
            CONSTRAINT no_overlapping_bookings EXCLUDE USING gist (
                painter_id WITH =,
                tsrange(date + start_time, date + end_time) WITH &&
            ) WHERE (status <> 'cancelled')
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
