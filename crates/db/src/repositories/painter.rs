use crate::models::DbPainter;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_painter_by_user_id(pool: &Pool<Postgres>, user_id: i64) -> Result<Option<DbPainter>> {
    let painter = sqlx::query_as::<_, DbPainter>(
        r#"
        SELECT p.user_id, u.name, p.rating, p.specialization
        FROM painters p
        LEFT JOIN users u ON u.id = p.user_id
        WHERE p.user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    if painter.is_none() {
        tracing::debug!("No painter profile for user_id={}", user_id);
    }
    Ok(painter)
}

/// Every painter profile, optionally restricted to one specialization.
pub async fn get_painters(pool: &Pool<Postgres>, specialization: Option<&str>) -> Result<Vec<DbPainter>> {
    let painters = sqlx::query_as::<_, DbPainter>(
        r#"
        SELECT p.user_id, u.name, p.rating, p.specialization
        FROM painters p
        LEFT JOIN users u ON u.id = p.user_id
        WHERE $1::text IS NULL OR p.specialization = $1
        ORDER BY p.user_id ASC
        "#,
    )
    .bind(specialization)
    .fetch_all(pool)
    .await?;

    tracing::debug!("Loaded {} painters", painters.len());
    Ok(painters)
}

/// Creates the painter profile for `user_id`, or returns the existing one
/// untouched.
pub async fn create_painter_profile(
    pool: &Pool<Postgres>,
    user_id: i64,
    rating: f64,
    specialization: &str,
) -> Result<(DbPainter, bool)> {
    let inserted = sqlx::query(
        r#"
        INSERT INTO painters (user_id, rating, specialization)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(rating)
    .bind(specialization)
    .execute(pool)
    .await?
    .rows_affected()
        > 0;

    let painter = get_painter_by_user_id(pool, user_id)
        .await?
        .ok_or_else(|| eyre::eyre!("Painter profile for user {} vanished after insert", user_id))?;

    Ok((painter, inserted))
}
