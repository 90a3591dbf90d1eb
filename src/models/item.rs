// src/models/item.rs

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Kind of bucket entry. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ItemType {
    Activity,
    Media,
    Food,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Activity => "activity",
            ItemType::Media => "media",
            ItemType::Food => "food",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents the 'items' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Item {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub item_type: ItemType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub bucket_id: Uuid,

    /// Score per user id.
    /// Stored as a JSON object in the database.
    #[schema(value_type = Object)]
    pub ratings: Json<HashMap<String, f64>>,

    /// Comment text per user id.
    #[schema(value_type = Object)]
    pub comments: Json<HashMap<String, String>>,

    pub complete: bool,
}

impl Item {
    pub fn new(payload: CreateItem, bucket_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: payload.title,
            description: payload.description,
            location: payload.location,
            item_type: payload.item_type,
            created_at: now,
            updated_at: now,
            bucket_id,
            ratings: Json(HashMap::new()),
            comments: Json(HashMap::new()),
            complete: false,
        }
    }

    /// Overwrites only the fields present in `update` and advances `updated_at`.
    ///
    /// `score` and `comment` are recorded under `actor`, replacing whatever
    /// that user left before. Entries from other users are kept.
    pub fn apply_update(&mut self, update: ItemUpdate, actor: Uuid) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(location) = update.location {
            self.location = Some(location);
        }
        if let Some(score) = update.score {
            self.ratings.0.insert(actor.to_string(), score);
        }
        if let Some(comment) = update.comment {
            self.comments.0.insert(actor.to_string(), comment);
        }
        if let Some(complete) = update.complete {
            self.complete = complete;
        }
        self.updated_at = Utc::now();
    }
}

/// DTO for creating a new item.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub item_type: ItemType,
}

/// DTO for a partial item update.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = validate_item_update))]
pub struct ItemUpdate {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub score: Option<f64>,
    #[validate(length(min = 1))]
    pub comment: Option<String>,
    pub complete: Option<bool>,
}

/// JSON has no NaN or infinity; a non-finite score would be stored as `null`.
fn validate_item_update(update: &ItemUpdate) -> Result<(), validator::ValidationError> {
    if update.score.is_some_and(|score| !score.is_finite()) {
        return Err(validator::ValidationError::new("score_not_finite"));
    }
    Ok(())
}
