//! # parley-store
//!
//! Local preference storage for the Parley client, backed by SQLite.
//!
//! Two independent key/value tables live in one database file: flat
//! settings (each key with its own default) and the custom theme list
//! (one JSON blob). The crate exposes a synchronous `Database` handle that
//! wraps a `rusqlite::Connection`.

pub mod database;
pub mod migrations;
pub mod models;
pub mod settings;
pub mod themes;

mod error;
mod kv;

pub use database::{default_data_dir, Database};
pub use error::{Result, StoreError};
pub use models::*;
pub use settings::{keys, BoolKey, StringKey};
