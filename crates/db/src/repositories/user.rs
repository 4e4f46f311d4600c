use crate::models::DbUser;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub const ROLE_CUSTOMER: &str = "customer";
pub const ROLE_PAINTER: &str = "painter";

pub async fn create_user(pool: &Pool<Postgres>, email: &str, name: &str, role: &str) -> Result<DbUser> {
    tracing::debug!("Creating user: email={}, role={}", email, role);

    let user = sqlx::query_as::<_, DbUser>(
        r#"
        INSERT INTO users (email, name, role, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, email, name, role, created_at
        "#,
    )
    .bind(email)
    .bind(name)
    .bind(role)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn get_user_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, email, name, role, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
