use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("API key required")]
    ApiKeyRequired { hint: String },
}

/// Failures of a single request/response exchange with the pug API.
///
/// A server that answers with a valid envelope is never an error here, even
/// when its response code reports a refused action (`PugFull`, `InvalidMap`, ...).
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Could not reach {endpoint}: {message}")]
    Transport { endpoint: String, message: String },
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64, endpoint: String },
    #[error("HTTP error: {status} {message}")]
    Http {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("Failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
    #[error("Unknown response code {code} from {endpoint}")]
    UnknownResponseCode { code: i64, endpoint: String },
    #[error("Unexpected payload for {code}: {message}")]
    Payload { code: String, message: String },
}

impl ApiError {
    /// True when the server was never reached or never answered.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport { .. } | ApiError::Timeout { .. })
    }

    /// True when the server answered but the body could not be understood.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            ApiError::Decode { .. } | ApiError::UnknownResponseCode { .. } | ApiError::Payload { .. }
        )
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration save failed: {message}")]
    ConfigSaveFailed { message: String },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Profile '{name}' not found")]
    ProfileNotFound { name: String },
    #[error("Unknown configuration key '{key}'")]
    UnknownKey { key: String },
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "critical",
            ErrorSeverity::High => "high",
            ErrorSeverity::Medium => "medium",
            ErrorSeverity::Low => "low",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Low,
            AppError::Api(api_error) => match api_error {
                ApiError::Transport { .. } => ErrorSeverity::High,
                ApiError::Timeout { .. } => ErrorSeverity::Medium,
                ApiError::Http { status, .. } if *status >= 500 => ErrorSeverity::High,
                ApiError::Http { .. } => ErrorSeverity::Medium,
                ApiError::Decode { .. } | ApiError::UnknownResponseCode { .. } => {
                    ErrorSeverity::High
                }
                ApiError::Payload { .. } => ErrorSeverity::Medium,
            },
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(StorageError::ConfigDirNotFound) => ErrorSeverity::Critical,
            AppError::Storage(_) => ErrorSeverity::Medium,
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Cli(CliError::ApiKeyRequired { hint }) => Some(hint.clone()),
            AppError::Api(ApiError::Transport { .. } | ApiError::Timeout { .. }) => Some(
                "Check that the pug API server is running and that api_url is correct".to_string(),
            ),
            AppError::Api(ApiError::Http { status: 403, .. }) => {
                Some("The server rejected the API key; check PUG_API_KEY".to_string())
            }
            AppError::Config(ConfigError::ProfileNotFound { .. }) => {
                Some("'pug-cli config set api_url <url>' creates the profile".to_string())
            }
            AppError::Config(ConfigError::UnknownKey { .. }) => {
                Some("Supported keys: api_url, timeout_seconds".to_string())
            }
            _ => None,
        }
    }
}
