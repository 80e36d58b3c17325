//! Input validation for configuration values.

use crate::error::ConfigError;

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> Result<(), ConfigError> {
    if url.is_empty() {
        return Err(invalid("api_url", url, "URL cannot be empty"));
    }

    // Basic URL validation - must start with http:// or https://
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(invalid(
            "api_url",
            url,
            "URL must start with http:// or https://",
        ));
    }

    Ok(())
}

/// Parse a timeout in whole seconds; zero is rejected.
pub fn validate_timeout(value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(invalid("timeout_seconds", value, "timeout must be positive")),
        Ok(secs) => Ok(secs),
        Err(e) => Err(invalid("timeout_seconds", value, &e.to_string())),
    }
}

fn invalid(field: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_valid_urls() {
        assert!(validate_url("http://localhost:51515").is_ok());
        assert!(validate_url("https://pug.example.com/").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_invalid_urls() {
        assert!(validate_url("").is_err());
        assert!(validate_url("localhost:51515").is_err());
        assert!(validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_timeout() {
        assert_eq!(validate_timeout("30").ok(), Some(30));
        assert_eq!(validate_timeout(" 5 ").ok(), Some(5));
        assert!(validate_timeout("0").is_err());
        assert!(validate_timeout("-1").is_err());
        assert!(validate_timeout("later").is_err());
    }
}
