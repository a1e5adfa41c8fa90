// lib/src/lib.rs
// Storage layer: configuration, the shared database handle and every SQL
// statement the Healthify services run.

pub mod config;
pub mod database;
pub mod errors;
pub mod storage_engine;

#[cfg(any(test, feature = "test-suite"))]
pub mod fixtures;

pub use crate::config::{load_app_config, AppConfig, DatabaseConfig, LabConfig, ServerConfig};
pub use crate::database::Database;
pub use crate::errors::{Result, StorageError};
pub use crate::storage_engine::Sequence;
