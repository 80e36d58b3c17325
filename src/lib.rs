//! # pug-client
//!
//! Typed client for the TF2 pick-up-game (pug) coordination API.
//!
//! Each operation sends one request and returns the decoded envelope: a
//! [`ResponseCode`](api::models::ResponseCode) plus the raw JSON payload,
//! with a typed view available through [`ApiResult::payload`](api::models::ApiResult::payload).
//!
//! ```rust,ignore
//! use pug_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> pug_client::Result<()> {
//!     let client = PugClient::new("http://localhost:51515".to_string(), "123abc".to_string())?;
//!
//!     let result = client.add_player(76561197960265728, "joe", DEFAULT_PUG_SIZE, None).await?;
//!     if let Payload::PlayerAdded(pug) = result.payload()? {
//!         println!("joined pug {} ({}/{})", pug.id, pug.player_count(), pug.size);
//!     }
//!     Ok(())
//! }
//! ```

pub use error::AppError;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::Result;
    pub use crate::api::client::PugClient;
    pub use crate::api::endpoints::Endpoint;
    pub use crate::api::models::{ApiResult, Payload, Player, Pug, PugState, ResponseCode};
    pub use crate::api::params::{ApiRequest, DEFAULT_PUG_SIZE};
    pub use crate::error::{ApiError, AppError};
}

/// Main architecture layers (dependency flow: CLI → API → Storage)
pub mod cli; // Command-line interface
pub mod storage; // Configuration and API key lookup

/// Support modules (used across layers)
pub mod api; // Pug API client
pub mod display; // Output formatting
pub mod error; // Error handling
pub mod utils; // Shared utilities and helpers

pub type Result<T> = std::result::Result<T, AppError>;
