// src/lib.rs

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod openapi;
pub mod repositories;
pub mod utils;

pub use error::AppError;
