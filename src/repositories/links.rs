// src/repositories/links.rs

use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{user::User, user_bucket_link::UserBucketLink},
};

pub(crate) async fn insert(
    conn: &mut SqliteConnection,
    bucket_id: Uuid,
    user_id: Uuid,
) -> Result<UserBucketLink, AppError> {
    let link = UserBucketLink::new(bucket_id, user_id);

    sqlx::query("INSERT INTO user_bucket_links (bucket_id, user_id) VALUES (?, ?)")
        .bind(link.bucket_id)
        .bind(link.user_id)
        .execute(conn)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::Conflict(format!(
                "User {} is already linked to bucket {}",
                user_id, bucket_id
            )),
            other => other,
        })?;

    Ok(link)
}

/// Adds `user_id` as a collaborator of `bucket_id`.
///
/// A pair can be linked only once (`Conflict`); both ends must exist
/// (`ReferenceError`).
pub async fn add(pool: &SqlitePool, bucket_id: Uuid, user_id: Uuid) -> Result<UserBucketLink, AppError> {
    let mut conn = pool.acquire().await?;
    let link = insert(&mut *conn, bucket_id, user_id).await?;

    tracing::info!("Linked user {} to bucket {}", user_id, bucket_id);
    Ok(link)
}

/// Removes a collaborator.
///
/// The owner stays linked for the lifetime of the bucket, so unlinking the
/// owner is a `Conflict`. Returns `NotFound` if the pair was not linked.
pub async fn remove(pool: &SqlitePool, bucket_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let owner_id: Option<Uuid> = sqlx::query_scalar("SELECT owner_id FROM buckets WHERE id = ?")
        .bind(bucket_id)
        .fetch_optional(&mut *tx)
        .await?;

    if owner_id == Some(user_id) {
        return Err(AppError::Conflict(format!(
            "User {} owns bucket {} and cannot be unlinked",
            user_id, bucket_id
        )));
    }

    let result = sqlx::query("DELETE FROM user_bucket_links WHERE bucket_id = ? AND user_id = ?")
        .bind(bucket_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Link not found".to_string()));
    }

    tx.commit().await?;

    tracing::info!("Unlinked user {} from bucket {}", user_id, bucket_id);
    Ok(())
}

/// Lists the users linked to a bucket, in the order they joined.
pub async fn list_users(pool: &SqlitePool, bucket_id: Uuid) -> Result<Vec<User>, AppError> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.firstname, u.lastname, u.username, u.email, u.hashed_password, u.created_at
        FROM users u
        JOIN user_bucket_links l ON l.user_id = u.id
        WHERE l.bucket_id = ?
        ORDER BY l.rowid ASC
        "#,
    )
    .bind(bucket_id)
    .fetch_all(pool)
    .await?;

    Ok(users)
}
