// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub hashed_password: String,

    pub created_at: DateTime<Utc>,
}

impl User {
    /// Builds a new record with a fresh id and the current time.
    /// `hashed_password` must already be hashed.
    pub fn new(payload: CreateUser, hashed_password: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            firstname: payload.firstname,
            lastname: payload.lastname,
            username: payload.username,
            email: payload.email,
            hashed_password,
            created_at: Utc::now(),
        }
    }

    /// Overwrites only the fields present in `update`.
    ///
    /// `update.password` is plaintext and is never stored; the caller passes
    /// its hash as `hashed_password`.
    pub fn apply_update(&mut self, update: UserUpdate, hashed_password: Option<String>) {
        if let Some(username) = update.username {
            self.username = username;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(firstname) = update.firstname {
            self.firstname = firstname;
        }
        if let Some(lastname) = update.lastname {
            self.lastname = lastname;
        }
        if let Some(hashed_password) = hashed_password {
            self.hashed_password = hashed_password;
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "firstname must not be empty"))]
    pub firstname: String,
    #[validate(length(min = 1, message = "lastname must not be empty"))]
    pub lastname: String,
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "email must not be empty"))]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

/// DTO for a partial user update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UserUpdate {
    #[validate(length(min = 1))]
    pub username: Option<String>,
    #[validate(length(min = 1))]
    pub email: Option<String>,
    #[validate(length(min = 1))]
    pub password: Option<String>,
    #[validate(length(min = 1))]
    pub firstname: Option<String>,
    #[validate(length(min = 1))]
    pub lastname: Option<String>,
}

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserPublic {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        UserPublic {
            id: user.id,
            username: user.username,
            email: user.email,
            firstname: user.firstname,
            lastname: user.lastname,
            created_at: user.created_at,
        }
    }
}
