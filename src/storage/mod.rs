//! Storage layer for pug-cli
//!
//! Handles the TOML profile configuration and API key lookup. The API key is
//! never written to disk.

use crate::error::StorageError;

pub mod config;
pub mod credentials;

type Result<T> = std::result::Result<T, StorageError>;
