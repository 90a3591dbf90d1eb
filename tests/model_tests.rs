// tests/model_tests.rs

use axum::{http::StatusCode, response::IntoResponse};
use bucketlist::{
    error::AppError,
    models::{
        bucket::{Bucket, BucketPublic, BucketPublicWithUsers, BucketUpdate, CreateBucket},
        item::{CreateItem, Item, ItemType, ItemUpdate},
        user::{CreateUser, User, UserPublic, UserUpdate},
    },
    openapi::ApiDoc,
};
use std::collections::HashSet;
use utoipa::OpenApi;
use uuid::Uuid;
use validator::Validate;

fn sample_user() -> User {
    User::new(
        CreateUser {
            firstname: "Ada".to_string(),
            lastname: "Lovelace".to_string(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "plaintext".to_string(),
        },
        "$argon2id$fake".to_string(),
    )
}

fn sample_item() -> Item {
    Item::new(
        CreateItem {
            title: "Ramen".to_string(),
            description: Some("Tonkotsu".to_string()),
            location: Some("Tokyo".to_string()),
            item_type: ItemType::Food,
        },
        Uuid::new_v4(),
    )
}

fn object_keys(value: &serde_json::Value) -> HashSet<String> {
    value
        .as_object()
        .expect("expected a JSON object")
        .keys()
        .cloned()
        .collect()
}

#[test]
fn new_records_get_distinct_ids() {
    let a = sample_user();
    let b = sample_user();
    assert_ne!(a.id, b.id);
    assert!(!a.id.is_nil());

    let owner = Uuid::new_v4();
    let payload = CreateBucket {
        title: "Trip".to_string(),
        description: "Summer trip".to_string(),
    };
    let b1 = Bucket::new(payload.clone(), owner);
    let b2 = Bucket::new(payload, owner);
    assert_ne!(b1.id, b2.id);

    assert_ne!(sample_item().id, sample_item().id);
}

#[test]
fn timestamps_are_taken_per_record() {
    let first = sample_user();
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = sample_user();
    assert!(second.created_at > first.created_at);
}

#[test]
fn user_update_only_touches_supplied_fields() {
    let mut user = sample_user();
    let before = user.clone();

    user.apply_update(
        UserUpdate {
            email: Some("ada@lovelace.dev".to_string()),
            ..Default::default()
        },
        None,
    );

    assert_eq!(user.email, "ada@lovelace.dev");
    assert_eq!(user.username, before.username);
    assert_eq!(user.firstname, before.firstname);
    assert_eq!(user.lastname, before.lastname);
    assert_eq!(user.hashed_password, before.hashed_password);
    assert_eq!(user.id, before.id);
    assert_eq!(user.created_at, before.created_at);
}

#[test]
fn user_serialization_never_exposes_password_hash() {
    let user = sample_user();

    let stored = serde_json::to_value(&user).unwrap();
    assert!(stored.get("hashed_password").is_none());

    let public = serde_json::to_value(UserPublic::from(user)).unwrap();
    let expected: HashSet<String> = ["id", "username", "email", "firstname", "lastname", "created_at"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(object_keys(&public), expected);
}

#[test]
fn trip_bucket_defaults_and_public_shape() {
    let owner = Uuid::new_v4();
    let bucket = Bucket::new(
        CreateBucket {
            title: "Trip".to_string(),
            description: "Summer trip".to_string(),
        },
        owner,
    );

    assert!(!bucket.bookmark);
    assert_eq!(bucket.owner_id, owner);
    assert_eq!(bucket.description.as_deref(), Some("Summer trip"));
    assert_eq!(bucket.created_at, bucket.updated_at);

    let public = BucketPublic::from(bucket.clone());
    assert_eq!(public.id, bucket.id);
    assert_eq!(public.title, "Trip");

    let value = serde_json::to_value(&public).unwrap();
    let expected: HashSet<String> = [
        "id",
        "title",
        "description",
        "bookmark",
        "created_at",
        "updated_at",
        "owner_id",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    assert_eq!(object_keys(&value), expected);
}

#[test]
fn bucket_with_users_embeds_public_users() {
    let user = sample_user();
    let bucket = Bucket::new(
        CreateBucket {
            title: "Trip".to_string(),
            description: "Summer trip".to_string(),
        },
        user.id,
    );

    let view = BucketPublicWithUsers::new(bucket, vec![UserPublic::from(user.clone())]);
    let value = serde_json::to_value(&view).unwrap();

    assert_eq!(value["title"], "Trip");
    assert_eq!(value["owner_id"], user.id.to_string());
    let users = value["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["username"], "ada");
    assert!(users[0].get("hashed_password").is_none());
}

#[test]
fn bucket_update_is_partial_and_advances_updated_at() {
    let mut bucket = Bucket::new(
        CreateBucket {
            title: "Trip".to_string(),
            description: "Summer trip".to_string(),
        },
        Uuid::new_v4(),
    );
    let before = bucket.clone();

    bucket.apply_update(BucketUpdate {
        bookmark: Some(true),
        ..Default::default()
    });

    assert!(bucket.bookmark);
    assert_eq!(bucket.title, before.title);
    assert_eq!(bucket.description, before.description);
    assert_eq!(bucket.created_at, before.created_at);
    assert!(bucket.updated_at >= before.updated_at);
}

#[test]
fn item_type_accepts_only_known_values() {
    for name in ["activity", "media", "food"] {
        let payload: CreateItem =
            serde_json::from_value(serde_json::json!({"title": "x", "item_type": name})).unwrap();
        assert_eq!(payload.item_type.as_str(), name);
    }

    let result = serde_json::from_value::<CreateItem>(serde_json::json!({
        "title": "x",
        "item_type": "sport"
    }));
    let err = AppError::from(result.unwrap_err());
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[test]
fn create_item_requires_item_type() {
    let result = serde_json::from_value::<CreateItem>(serde_json::json!({"title": "x"}));
    assert!(result.is_err());
}

#[test]
fn new_item_starts_incomplete_and_empty() {
    let item = sample_item();
    assert!(!item.complete);
    assert!(item.ratings.0.is_empty());
    assert!(item.comments.0.is_empty());
}

#[test]
fn item_complete_update_leaves_content_alone() {
    let mut item = sample_item();
    item.ratings.0.insert("someone".to_string(), 3.0);
    let before = item.clone();

    item.apply_update(
        ItemUpdate {
            complete: Some(true),
            ..Default::default()
        },
        Uuid::new_v4(),
    );

    assert!(item.complete);
    assert_eq!(item.title, before.title);
    assert_eq!(item.description, before.description);
    assert_eq!(item.location, before.location);
    assert_eq!(item.ratings.0, before.ratings.0);
    assert_eq!(item.comments.0, before.comments.0);
    assert!(item.updated_at >= before.updated_at);
}

#[test]
fn score_and_comment_are_keyed_by_actor() {
    let mut item = sample_item();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    item.apply_update(
        ItemUpdate {
            score: Some(4.0),
            comment: Some("great".to_string()),
            ..Default::default()
        },
        alice,
    );
    item.apply_update(
        ItemUpdate {
            score: Some(2.5),
            ..Default::default()
        },
        bob,
    );
    item.apply_update(
        ItemUpdate {
            score: Some(5.0),
            ..Default::default()
        },
        alice,
    );

    assert_eq!(item.ratings.0.len(), 2);
    assert_eq!(item.ratings.0.get(&alice.to_string()), Some(&5.0));
    assert_eq!(item.ratings.0.get(&bob.to_string()), Some(&2.5));
    assert_eq!(item.comments.0.len(), 1);
    assert_eq!(item.comments.0.get(&alice.to_string()).map(String::as_str), Some("great"));
}

#[test]
fn item_update_rejects_non_finite_score() {
    for score in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let update = ItemUpdate {
            score: Some(score),
            ..Default::default()
        };
        let err = AppError::from(update.validate().unwrap_err());
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    let update = ItemUpdate {
        score: Some(4.5),
        ..Default::default()
    };
    assert!(update.validate().is_ok());
}

#[test]
fn openapi_public_schemas_have_no_secrets() {
    let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
    let schemas = &doc["components"]["schemas"];

    for name in ["UserPublic", "BucketPublic", "CreateItem", "ItemType"] {
        assert!(schemas.get(name).is_some(), "missing schema {}", name);
    }

    let user_props = object_keys(&schemas["UserPublic"]["properties"]);
    assert!(!user_props.contains("hashed_password"));
    assert!(!user_props.contains("password"));
    assert!(schemas.get("User").is_none());
}

#[test]
fn errors_map_to_http_statuses() {
    let cases = [
        (AppError::BadRequest("bad".into()), StatusCode::BAD_REQUEST),
        (AppError::NotFound("gone".into()), StatusCode::NOT_FOUND),
        (AppError::Conflict("dup".into()), StatusCode::CONFLICT),
        (
            AppError::ReferenceError("fk".into()),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        (
            AppError::InternalServerError("boom".into()),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (err, status) in cases {
        assert_eq!(err.into_response().status(), status);
    }
}
