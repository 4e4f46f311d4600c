use crate::models::DbAvailability;
use crate::repositories::booking::lock_painter;
use chrono::{DateTime, Utc};
use eyre::Result;
use paintbook_core::models::availability::{Availability, AvailabilityChanges};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_availability(
    pool: &Pool<Postgres>,
    painter_id: i64,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<DbAvailability> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating availability: id={}, painter_id={}, start={}, end={}",
        id, painter_id, start_time, end_time
    );

    let availability = sqlx::query_as::<_, DbAvailability>(
        r#"
        INSERT INTO availabilities (id, painter_id, start_time, end_time, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, painter_id, start_time, end_time, created_at
        "#,
    )
    .bind(id)
    .bind(painter_id)
    .bind(start_time)
    .bind(end_time)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(availability)
}

pub async fn get_all_availabilities(pool: &Pool<Postgres>) -> Result<Vec<DbAvailability>> {
    let availabilities = sqlx::query_as::<_, DbAvailability>(
        r#"
        SELECT id, painter_id, start_time, end_time, created_at
        FROM availabilities
        ORDER BY start_time ASC, created_at ASC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    tracing::debug!("Loaded {} availabilities", availabilities.len());
    Ok(availabilities)
}

pub async fn get_availabilities_by_painter(
    pool: &Pool<Postgres>,
    painter_id: i64,
) -> Result<Vec<DbAvailability>> {
    let availabilities = sqlx::query_as::<_, DbAvailability>(
        r#"
        SELECT id, painter_id, start_time, end_time, created_at
        FROM availabilities
        WHERE painter_id = $1
        ORDER BY start_time ASC, created_at ASC, id ASC
        "#,
    )
    .bind(painter_id)
    .fetch_all(pool)
    .await?;

    Ok(availabilities)
}

pub async fn get_availability_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbAvailability>> {
    let availability = sqlx::query_as::<_, DbAvailability>(
        r#"
        SELECT id, painter_id, start_time, end_time, created_at
        FROM availabilities
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(availability)
}

/// Applies `changes` to one window inside a transaction.
///
/// The row is locked for the read-modify-write, and the painter's advisory
/// lock keeps the edit from interleaving with that painter's booking writes.
pub async fn update_availability(
    pool: &Pool<Postgres>,
    id: Uuid,
    changes: &AvailabilityChanges,
) -> Result<Option<DbAvailability>> {
    let mut tx = pool.begin().await?;

    let Some(current) = sqlx::query_as::<_, DbAvailability>(
        r#"
        SELECT id, painter_id, start_time, end_time, created_at
        FROM availabilities
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    else {
        return Ok(None);
    };

    lock_painter(&mut tx, current.painter_id).await?;
    let window = changes.apply(&Availability::from(current))?;

    let availability = sqlx::query_as::<_, DbAvailability>(
        r#"
        UPDATE availabilities
        SET start_time = $2, end_time = $3
        WHERE id = $1
        RETURNING id, painter_id, start_time, end_time, created_at
        "#,
    )
    .bind(id)
    .bind(window.start_time)
    .bind(window.end_time)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::debug!(
        "Availability updated: id={}, start={}, end={}",
        id, availability.start_time, availability.end_time
    );
    Ok(Some(availability))
}

pub async fn delete_availability(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM availabilities
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_availabilities_by_painter(pool: &Pool<Postgres>, painter_id: i64) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM availabilities
        WHERE painter_id = $1
        "#,
    )
    .bind(painter_id)
    .execute(pool)
    .await?;

    tracing::debug!(
        "Deleted {} availabilities for painter_id={}",
        result.rows_affected(),
        painter_id
    );
    Ok(result.rows_affected())
}
