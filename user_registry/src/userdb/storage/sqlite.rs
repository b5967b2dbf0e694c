use sqlx::{Pool, Sqlite};

use crate::userdb::{errors::UserError, types::User};

use super::config::DB_TABLE_USERS;

// SQLite implementations
pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    // AUTOINCREMENT keeps ids monotonically increasing and never reused
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            photo_path TEXT,
            created_at TIMESTAMP NOT NULL
        )
        "#,
        table_name
    ))
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn insert_user_sqlite(
    pool: &Pool<Sqlite>,
    name: &str,
    email: &str,
    photo_path: Option<&str>,
) -> Result<User, UserError> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO {} (name, email, photo_path, created_at)
        VALUES (?, ?, ?, ?)
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

pub(super) async fn get_user_sqlite(
    pool: &Pool<Sqlite>,
    id: i64,
) -> Result<Option<User>, UserError> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT * FROM {} WHERE id = ?
        "#,
        DB_TABLE_USERS.as_str()
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))
}

pub(super) async fn list_users_sqlite(pool: &Pool<Sqlite>) -> Result<Vec<User>, UserError> {
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

pub(super) async fn update_user_sqlite(
    pool: &Pool<Sqlite>,
    user: &User,
) -> Result<User, UserError> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE {} SET name = ?, email = ?, photo_path = ?
        WHERE id = ?
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

pub(super) async fn delete_user_sqlite(
    pool: &Pool<Sqlite>,
    id: i64,
) -> Result<Option<User>, UserError> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        DELETE FROM {} WHERE id = ?
        RETURNING *
        "#,
        DB_TABLE_USERS.as_str()
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))
}

pub(super) async fn ping_sqlite(pool: &Pool<Sqlite>) -> Result<(), UserError> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(())
}
