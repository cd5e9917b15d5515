//! Storage layer for the journal

pub mod db;
pub mod models;

pub use db::{default_db_path, Database, StorageError};
pub use models::*;
