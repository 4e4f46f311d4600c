use crate::error::{BookingOverlap, MissingReference, is_exclusion_violation, is_foreign_key_violation};
use crate::models::DbBooking;
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::Result;
use paintbook_core::models::booking::BookingStatus;
use paintbook_core::time::TimeOfDay;
use sqlx::{Pool, Postgres, Transaction};
use uuid::Uuid;

pub async fn get_all_bookings(pool: &Pool<Postgres>) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, painter_id, customer_id, date, start_time, end_time, status, created_at, updated_at
        FROM bookings
        ORDER BY date ASC, start_time ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbBooking>> {
    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, painter_id, customer_id, date, start_time, end_time, status, created_at, updated_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

pub async fn get_bookings_by_painter(pool: &Pool<Postgres>, painter_id: i64) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, painter_id, customer_id, date, start_time, end_time, status, created_at, updated_at
        FROM bookings
        WHERE painter_id = $1
        ORDER BY date ASC, start_time ASC
        "#,
    )
    .bind(painter_id)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

pub async fn get_bookings_by_customer(pool: &Pool<Postgres>, customer_id: i64) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, painter_id, customer_id, date, start_time, end_time, status, created_at, updated_at
        FROM bookings
        WHERE customer_id = $1
        ORDER BY date ASC, start_time ASC
        "#,
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

pub async fn get_active_bookings_on(
    pool: &Pool<Postgres>,
    painter_id: i64,
    date: NaiveDate,
) -> Result<Vec<DbBooking>> {
    tracing::debug!("Getting active bookings: painter_id={}, date={}", painter_id, date);

    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, painter_id, customer_id, date, start_time, end_time, status, created_at, updated_at
        FROM bookings
        WHERE painter_id = $1 AND date = $2 AND status <> 'cancelled'
        ORDER BY start_time ASC
        "#,
    )
    .bind(painter_id)
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

/// Inserts a booking, refusing to overlap an active booking of the same
/// painter on the same date.
///
/// Concurrent writers for one painter are serialised on a transaction-scoped
/// advisory lock; the `no_overlapping_bookings` constraint backs the check.
pub async fn create_booking(
    pool: &Pool<Postgres>,
    painter_id: i64,
    customer_id: i64,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    status: BookingStatus,
) -> Result<DbBooking> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating booking: id={}, painter_id={}, customer_id={}, date={}, start={}, end={}",
        id, painter_id, customer_id, date, start_time, end_time
    );

    let mut tx = pool.begin().await?;

    if status.is_active() {
        lock_painter(&mut tx, painter_id).await?;
        if let Some(existing) =
            find_overlapping_booking(&mut tx, painter_id, date, start_time, end_time, None).await?
        {
            return Err(overlap_with(&existing).into());
        }
    }

    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (id, painter_id, customer_id, date, start_time, end_time, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
        RETURNING id, painter_id, customer_id, date, start_time, end_time, status, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(painter_id)
    .bind(customer_id)
    .bind(date)
    .bind(start_time)
    .bind(end_time)
    .bind(status.as_str())
    .bind(now)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| write_error(e, painter_id, date))?;

    tx.commit().await?;

    tracing::debug!("Booking created successfully: id={}", booking.id);
    Ok(booking)
}

/// Sets a booking's status. Moving a cancelled booking back to an active
/// status runs the same overlap check as [`create_booking`].
pub async fn update_booking_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: BookingStatus,
) -> Result<Option<DbBooking>> {
    let mut tx = pool.begin().await?;

    let Some(current) = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, painter_id, customer_id, date, start_time, end_time, status, created_at, updated_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    else {
        return Ok(None);
    };

    let reactivating = status.is_active() && current.status == BookingStatus::Cancelled.as_str();
    if reactivating {
        lock_painter(&mut tx, current.painter_id).await?;
        if let Some(existing) = find_overlapping_booking(
            &mut tx,
            current.painter_id,
            current.date,
            current.start_time,
            current.end_time,
            Some(id),
        )
        .await?
        {
            return Err(overlap_with(&existing).into());
        }
    }

    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        UPDATE bookings
        SET status = $2, updated_at = $3
        WHERE id = $1
        RETURNING id, painter_id, customer_id, date, start_time, end_time, status, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(status.as_str())
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| write_error(e, current.painter_id, current.date))?;

    tx.commit().await?;

    tracing::debug!("Booking status updated: id={}, status={}", id, status);
    Ok(Some(booking))
}

pub async fn delete_booking(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    tracing::debug!("Deleted booking: id={}, found={}", id, result.rows_affected() > 0);
    Ok(result.rows_affected() > 0)
}

/// Serialises booking writes and window edits of one painter until the
/// transaction ends.
pub(crate) async fn lock_painter(tx: &mut Transaction<'_, Postgres>, painter_id: i64) -> Result<()> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(painter_id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

async fn find_overlapping_booking(
    tx: &mut Transaction<'_, Postgres>,
    painter_id: i64,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    ignore: Option<Uuid>,
) -> Result<Option<DbBooking>> {
    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, painter_id, customer_id, date, start_time, end_time, status, created_at, updated_at
        FROM bookings
        WHERE painter_id = $1
          AND date = $2
          AND status <> 'cancelled'
          AND start_time < $4
          AND end_time > $3
          AND ($5::uuid IS NULL OR id <> $5)
        ORDER BY start_time ASC
        LIMIT 1
        "#,
    )
    .bind(painter_id)
    .bind(date)
    .bind(start_time)
    .bind(end_time)
    .bind(ignore)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(booking)
}

fn overlap_with(existing: &DbBooking) -> BookingOverlap {
    BookingOverlap(format!(
        "Painter {} is already booked on {} from {} to {}",
        existing.painter_id,
        existing.date,
        TimeOfDay::of(&existing.start_time),
        TimeOfDay::of(&existing.end_time)
    ))
}

fn write_error(error: sqlx::Error, painter_id: i64, date: NaiveDate) -> eyre::Report {
    if is_exclusion_violation(&error) {
        tracing::debug!("Exclusion constraint rejected booking for painter_id={}", painter_id);
        return BookingOverlap(format!(
            "Painter {} is already booked on {} at that time",
            painter_id, date
        ))
        .into();
    }
    if is_foreign_key_violation(&error) {
        tracing::debug!("Booking references an unknown user: painter_id={}", painter_id);
        return MissingReference("painterId or customerId does not match a user".to_string()).into();
    }
    error.into()
}
