//! API key handling.
//!
//! The pug API authenticates every request with a shared `key` parameter.
//! clap reads the key from `--api-key` or the `PUG_API_KEY` environment
//! variable; it is never stored in the config file.

pub const API_KEY_ENV: &str = "PUG_API_KEY";

/// Usable API key, if any. Empty values count as unset.
pub fn get_api_key(key: Option<&str>) -> Option<String> {
    key.filter(|k| !k.is_empty()).map(str::to_string)
}
