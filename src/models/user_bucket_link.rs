use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Represents the 'user_bucket_links' table: one row per collaborator of a
/// bucket. (bucket_id, user_id) is the primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRow, Serialize, Deserialize)]
pub struct UserBucketLink {
    pub bucket_id: Uuid,
    pub user_id: Uuid,
}

impl UserBucketLink {
    pub fn new(bucket_id: Uuid, user_id: Uuid) -> Self {
        Self { bucket_id, user_id }
    }
}
