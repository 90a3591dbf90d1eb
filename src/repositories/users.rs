// src/repositories/users.rs

use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        bucket::Bucket,
        user::{CreateUser, User, UserUpdate},
    },
    utils::hash::hash_password,
};

const USER_COLUMNS: &str =
    "id, firstname, lastname, username, email, hashed_password, created_at";

async fn fetch(conn: &mut SqliteConnection, id: Uuid) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE id = ?",
        USER_COLUMNS
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(user)
}

/// Registers a new user.
///
/// Hashes the password using Argon2 before storing it.
pub async fn create(pool: &SqlitePool, payload: CreateUser) -> Result<User, AppError> {
    payload.validate()?;

    let hashed_password = hash_password(&payload.password)?;
    let user = User::new(payload, hashed_password);

    sqlx::query(
        r#"
        INSERT INTO users (id, firstname, lastname, username, email, hashed_password, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(user.id)
    .bind(&user.firstname)
    .bind(&user.lastname)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.hashed_password)
    .bind(user.created_at)
    .execute(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create user: {:?}", e);
        AppError::from(e)
    })?;

    tracing::info!("Created user {} ({})", user.username, user.id);
    Ok(user)
}

pub async fn get(pool: &SqlitePool, id: Uuid) -> Result<User, AppError> {
    let mut conn = pool.acquire().await?;
    fetch(&mut *conn, id)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))
}

/// Applies a partial update. Only the fields present in `payload` change;
/// a new password is re-hashed.
pub async fn update(pool: &SqlitePool, id: Uuid, payload: UserUpdate) -> Result<User, AppError> {
    payload.validate()?;

    let hashed_password = payload
        .password
        .as_deref()
        .map(hash_password)
        .transpose()?;

    let mut tx = pool.begin().await?;

    let mut user = fetch(&mut *tx, id)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    user.apply_update(payload, hashed_password);

    sqlx::query(
        r#"
        UPDATE users
        SET firstname = ?, lastname = ?, username = ?, email = ?, hashed_password = ?
        WHERE id = ?
        "#,
    )
    .bind(&user.firstname)
    .bind(&user.lastname)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.hashed_password)
    .bind(user.id)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!("Failed to update user: {:?}", e);
        AppError::from(e)
    })?;

    tx.commit().await?;

    Ok(user)
}

/// Lists every bucket the user is linked to, oldest first.
pub async fn list_buckets(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<Bucket>, AppError> {
    let buckets = sqlx::query_as::<_, Bucket>(
        r#"
        SELECT b.id, b.title, b.description, b.bookmark, b.created_at, b.updated_at, b.owner_id
        FROM buckets b
        JOIN user_bucket_links l ON l.bucket_id = b.id
        WHERE l.user_id = ?
        ORDER BY b.created_at ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(buckets)
}
