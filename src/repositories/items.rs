// src/repositories/items.rs

use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::item::{CreateItem, Item, ItemUpdate},
};

const ITEM_COLUMNS: &str = "id, title, description, location, item_type, created_at, updated_at, \
                            bucket_id, ratings, comments, complete";

async fn fetch(conn: &mut SqliteConnection, id: Uuid) -> Result<Option<Item>, AppError> {
    let item = sqlx::query_as::<_, Item>(&format!(
        "SELECT {} FROM items WHERE id = ?",
        ITEM_COLUMNS
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(item)
}

/// Adds an item to a bucket.
/// Fails with `ReferenceError` if the bucket does not exist.
pub async fn create(pool: &SqlitePool, bucket_id: Uuid, payload: CreateItem) -> Result<Item, AppError> {
    payload.validate()?;

    let item = Item::new(payload, bucket_id);

    sqlx::query(
        r#"
        INSERT INTO items (
            id, title, description, location, item_type, created_at, updated_at,
            bucket_id, ratings, comments, complete
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(item.id)
    .bind(&item.title)
    .bind(&item.description)
    .bind(&item.location)
    .bind(item.item_type)
    .bind(item.created_at)
    .bind(item.updated_at)
    .bind(item.bucket_id)
    .bind(&item.ratings)
    .bind(&item.comments)
    .bind(item.complete)
    .execute(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create item: {:?}", e);
        AppError::from(e)
    })?;

    tracing::info!("Created {} item {} in bucket {}", item.item_type, item.id, bucket_id);
    Ok(item)
}

pub async fn get(pool: &SqlitePool, id: Uuid) -> Result<Item, AppError> {
    let mut conn = pool.acquire().await?;
    fetch(&mut *conn, id)
        .await?
        .ok_or(AppError::NotFound("Item not found".to_string()))
}

/// Lists the contents of a bucket, oldest first.
pub async fn list_for_bucket(pool: &SqlitePool, bucket_id: Uuid) -> Result<Vec<Item>, AppError> {
    let items = sqlx::query_as::<_, Item>(&format!(
        "SELECT {} FROM items WHERE bucket_id = ? ORDER BY created_at ASC",
        ITEM_COLUMNS
    ))
    .bind(bucket_id)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

/// Applies a partial update on behalf of `actor`.
///
/// A `score` or `comment` is recorded under the actor's id; everything else
/// follows plain patch semantics.
pub async fn update(
    pool: &SqlitePool,
    id: Uuid,
    actor: Uuid,
    payload: ItemUpdate,
) -> Result<Item, AppError> {
    payload.validate()?;

    let mut tx = pool.begin().await?;

    let mut item = fetch(&mut *tx, id)
        .await?
        .ok_or(AppError::NotFound("Item not found".to_string()))?;

    item.apply_update(payload, actor);

    sqlx::query(
        r#"
        UPDATE items
        SET title = ?, description = ?, location = ?, updated_at = ?,
            ratings = ?, comments = ?, complete = ?
        WHERE id = ?
        "#,
    )
    .bind(&item.title)
    .bind(&item.description)
    .bind(&item.location)
    .bind(item.updated_at)
    .bind(&item.ratings)
    .bind(&item.comments)
    .bind(item.complete)
    .bind(item.id)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!("Failed to update item: {:?}", e);
        AppError::from(e)
    })?;

    tx.commit().await?;

    Ok(item)
}
