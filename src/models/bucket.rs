use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::user::UserPublic;

/// Represents the 'buckets' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Bucket {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub bookmark: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// The user who created the bucket.
    pub owner_id: Uuid,
}

impl Bucket {
    pub fn new(payload: CreateBucket, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: payload.title,
            description: Some(payload.description),
            bookmark: false,
            created_at: now,
            updated_at: now,
            owner_id,
        }
    }

    /// Overwrites only the fields present in `update` and advances `updated_at`.
    pub fn apply_update(&mut self, update: BucketUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(bookmark) = update.bookmark {
            self.bookmark = bookmark;
        }
        self.updated_at = Utc::now();
    }
}

/// DTO for creating a new bucket.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBucket {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub description: String,
}

/// DTO for a partial bucket update.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct BucketUpdate {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub bookmark: Option<bool>,
}

/// Public view of a bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BucketPublic {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub bookmark: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_id: Uuid,
}

impl From<Bucket> for BucketPublic {
    fn from(bucket: Bucket) -> Self {
        BucketPublic {
            id: bucket.id,
            title: bucket.title,
            description: bucket.description,
            bookmark: bucket.bookmark,
            created_at: bucket.created_at,
            updated_at: bucket.updated_at,
            owner_id: bucket.owner_id,
        }
    }
}

/// Public view of a bucket with its collaborators embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BucketPublicWithUsers {
    #[serde(flatten)]
    pub bucket: BucketPublic,
    pub users: Vec<UserPublic>,
}

impl BucketPublicWithUsers {
    pub fn new(bucket: Bucket, users: Vec<UserPublic>) -> Self {
        Self {
            bucket: bucket.into(),
            users,
        }
    }
}
