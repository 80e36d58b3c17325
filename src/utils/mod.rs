//! Utils module - Shared utilities and helpers

/// reqwest error conversion helpers
pub mod error_helpers;

/// Logger initialisation and verbose output
pub mod logging;

/// Input validation for configuration values
pub mod validation;
