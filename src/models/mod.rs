// src/models/mod.rs

pub mod bucket;
pub mod item;
pub mod user;
pub mod user_bucket_link;
