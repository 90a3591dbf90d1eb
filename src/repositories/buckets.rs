// src/repositories/buckets.rs

use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        bucket::{Bucket, BucketPublicWithUsers, BucketUpdate, CreateBucket},
        user::UserPublic,
    },
    repositories::links,
};

const BUCKET_COLUMNS: &str = "id, title, description, bookmark, created_at, updated_at, owner_id";

async fn fetch(conn: &mut SqliteConnection, id: Uuid) -> Result<Option<Bucket>, AppError> {
    let bucket = sqlx::query_as::<_, Bucket>(&format!(
        "SELECT {} FROM buckets WHERE id = ?",
        BUCKET_COLUMNS
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(bucket)
}

/// Creates a bucket owned by `owner_id`.
///
/// The owner is linked as the first collaborator in the same transaction.
/// Fails with `ReferenceError` if the owner does not exist.
pub async fn create(
    pool: &SqlitePool,
    owner_id: Uuid,
    payload: CreateBucket,
) -> Result<Bucket, AppError> {
    payload.validate()?;

    let bucket = Bucket::new(payload, owner_id);

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO buckets (id, title, description, bookmark, created_at, updated_at, owner_id)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(bucket.id)
    .bind(&bucket.title)
    .bind(&bucket.description)
    .bind(bucket.bookmark)
    .bind(bucket.created_at)
    .bind(bucket.updated_at)
    .bind(bucket.owner_id)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create bucket: {:?}", e);
        AppError::from(e)
    })?;

    links::insert(&mut *tx, bucket.id, owner_id).await?;

    tx.commit().await?;

    tracing::info!("Created bucket {} for owner {}", bucket.id, owner_id);
    Ok(bucket)
}

pub async fn get(pool: &SqlitePool, id: Uuid) -> Result<Bucket, AppError> {
    let mut conn = pool.acquire().await?;
    fetch(&mut *conn, id)
        .await?
        .ok_or(AppError::NotFound("Bucket not found".to_string()))
}

/// Loads a bucket together with the public view of every linked user.
pub async fn get_with_users(pool: &SqlitePool, id: Uuid) -> Result<BucketPublicWithUsers, AppError> {
    let bucket = get(pool, id).await?;

    let users = links::list_users(pool, id)
        .await?
        .into_iter()
        .map(UserPublic::from)
        .collect();

    Ok(BucketPublicWithUsers::new(bucket, users))
}

/// Applies a partial update and advances `updated_at`.
pub async fn update(pool: &SqlitePool, id: Uuid, payload: BucketUpdate) -> Result<Bucket, AppError> {
    payload.validate()?;

    let mut tx = pool.begin().await?;

    let mut bucket = fetch(&mut *tx, id)
        .await?
        .ok_or(AppError::NotFound("Bucket not found".to_string()))?;

    bucket.apply_update(payload);

    sqlx::query(
        r#"
        UPDATE buckets
        SET title = ?, description = ?, bookmark = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&bucket.title)
    .bind(&bucket.description)
    .bind(bucket.bookmark)
    .bind(bucket.updated_at)
    .bind(bucket.id)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!("Failed to update bucket: {:?}", e);
        AppError::from(e)
    })?;

    tx.commit().await?;

    Ok(bucket)
}
