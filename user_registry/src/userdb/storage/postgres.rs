use sqlx::{Pool, Postgres};

use crate::storage::validate_postgres_table_schema;
use crate::userdb::{errors::UserError, types::User};

use super::config::DB_TABLE_USERS;

// PostgreSQL implementations
pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            photo_path TEXT,
            created_at TIMESTAMPTZ NOT NULL
        )
        "#,
        table_name
    ))
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(())
}

/// Validates that the users table schema matches what we expect
pub(super) async fn validate_user_tables_postgres(pool: &Pool<Postgres>) -> Result<(), UserError> {
    let expected_columns = vec![
        ("id", "bigint"),
        ("name", "text"),
        ("email", "text"),
        ("photo_path", "text"),
        ("created_at", "timestamp with time zone"),
    ];

    validate_postgres_table_schema(
        pool,
        DB_TABLE_USERS.as_str(),
        &expected_columns,
        UserError::Storage,
    )
    .await
}

pub(super) async fn insert_user_postgres(
    pool: &Pool<Postgres>,
    name: &str,
    email: &str,
    photo_path: Option<&str>,
) -> Result<User, UserError> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO {} (name, email, photo_path, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
        DB_TABLE_USERS.as_str()
    ))
    .bind(name)
    .bind(email)
    .bind(photo_path)
    .bind(chrono::Utc::now())
    .fetch_one(pool)
    .await
    .map_err(|e| UserError::from_sqlx(e, email))
}

pub(super) async fn get_user_postgres(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<Option<User>, UserError> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT * FROM {} WHERE id = $1
        "#,
        DB_TABLE_USERS.as_str()
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))
}

pub(super) async fn list_users_postgres(pool: &Pool<Postgres>) -> Result<Vec<User>, UserError> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT * FROM {} ORDER BY created_at DESC, id DESC
        "#,
        DB_TABLE_USERS.as_str()
    ))
    .fetch_all(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))
}

pub(super) async fn update_user_postgres(
    pool: &Pool<Postgres>,
    user: &User,
) -> Result<User, UserError> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE {} SET name = $1, email = $2, photo_path = $3
        WHERE id = $4
        RETURNING *
        "#,
        DB_TABLE_USERS.as_str()
    ))
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.photo_path)
    .bind(user.id)
    .fetch_optional(pool)
    .await
    .map_err(|e| UserError::from_sqlx(e, &user.email))?
    .ok_or(UserError::NotFound)
}

pub(super) async fn delete_user_postgres(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<Option<User>, UserError> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        DELETE FROM {} WHERE id = $1
        RETURNING *
        "#,
        DB_TABLE_USERS.as_str()
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))
}

pub(super) async fn ping_postgres(pool: &Pool<Postgres>) -> Result<(), UserError> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(())
}
