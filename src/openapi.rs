// src/openapi.rs

use utoipa::OpenApi;

use crate::models::{
    bucket::{BucketPublic, BucketPublicWithUsers, BucketUpdate, CreateBucket},
    item::{CreateItem, Item, ItemType, ItemUpdate},
    user::{CreateUser, UserPublic, UserUpdate},
};

/// OpenAPI components for every request and response shape.
/// Stored records that carry secrets (`User`, `Bucket`) are not listed.
#[derive(OpenApi)]
#[openapi(components(schemas(
    CreateUser,
    UserUpdate,
    UserPublic,
    CreateBucket,
    BucketUpdate,
    BucketPublic,
    BucketPublicWithUsers,
    ItemType,
    CreateItem,
    ItemUpdate,
    Item,
)))]
pub struct ApiDoc;
