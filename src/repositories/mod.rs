// src/repositories/mod.rs

pub mod buckets;
pub mod items;
pub mod links;
pub mod users;
