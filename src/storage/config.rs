use super::Result;
use crate::error::{ConfigError, StorageError};
use crate::utils::validation::{validate_timeout, validate_url};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_PROFILE: &str = "default";
pub const DEFAULT_API_URL: &str = "http://localhost:51515";

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    pub default_profile: Option<String>,
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    pub api_url: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: None,
        }
    }
}

impl Config {
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
                message: e.to_string(),
            })?;

        Ok(config)
    }

    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|e| StorageError::ConfigSaveFailed {
            message: e.to_string(),
        })?;

        fs::write(&config_path, toml_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(StorageError::ConfigDirNotFound)?;

        Ok(config_dir.join("pug-client").join("config.toml"))
    }

    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Profile name to use: explicit choice, then `default_profile`, then "default".
    pub fn resolve_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_string)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
    }

    /// Set a single profile field, creating the profile if needed.
    pub fn set_value(
        &mut self,
        profile_name: &str,
        key: &str,
        value: &str,
    ) -> std::result::Result<(), ConfigError> {
        let mut profile = self.get_profile(profile_name).cloned().unwrap_or_default();

        match key {
            "api_url" => {
                validate_url(value)?;
                profile.api_url = value.trim_end_matches('/').to_string();
            }
            "timeout_seconds" => {
                profile.timeout_seconds = Some(validate_timeout(value)?);
            }
            _ => {
                return Err(ConfigError::UnknownKey {
                    key: key.to_string(),
                });
            }
        }

        self.set_profile(profile_name.to_string(), profile);
        if self.default_profile.is_none() {
            self.default_profile = Some(profile_name.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_profile, None);
        assert_eq!(config.profiles.len(), 0);
        assert_eq!(config.resolve_profile_name(None), "default");
    }

    #[test]
    fn test_profile_management() {
        let mut config = Config::default();
        let profile = Profile {
            api_url: "http://pug.example.test".to_string(),
            timeout_seconds: Some(10),
        };
        config.set_profile("test".to_string(), profile.clone());

        let retrieved = config.get_profile("test");
        assert_eq!(retrieved, Some(&profile));
        // Nonexistent profile should return None
        assert!(config.get_profile("nonexistent").is_none());
    }

    #[test]
    fn test_resolve_profile_name() {
        let mut config = Config::default();
        config.default_profile = Some("lan".to_string());
        assert_eq!(config.resolve_profile_name(None), "lan");
        assert_eq!(config.resolve_profile_name(Some("eu")), "eu");
    }

    #[test]
    fn test_set_value_creates_profile() {
        let mut config = Config::default();
        config
            .set_value("lan", "api_url", "http://192.168.1.10:51515/")
            .expect("valid url");
        config
            .set_value("lan", "timeout_seconds", "5")
            .expect("valid timeout");

        let profile = config.get_profile("lan").expect("profile created");
        assert_eq!(profile.api_url, "http://192.168.1.10:51515");
        assert_eq!(profile.timeout_seconds, Some(5));
        assert_eq!(config.default_profile, Some("lan".to_string()));
    }

    #[test]
    fn test_set_value_rejects_bad_input() {
        let mut config = Config::default();
        assert!(matches!(
            config.set_value("lan", "colour", "blue"),
            Err(ConfigError::UnknownKey { .. })
        ));
        assert!(matches!(
            config.set_value("lan", "api_url", "localhost"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.set_value("lan", "timeout_seconds", "soon"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn test_config_load_save() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.default_profile = Some("test".to_string());
        config.set_profile(
            "test".to_string(),
            Profile {
                api_url: "http://pug.example.test".to_string(),
                timeout_seconds: Some(30),
            },
        );

        config
            .save(Some(config_path.clone()))
            .expect("Failed to save config");

        let loaded_config = Config::load(Some(config_path)).expect("Failed to load config");

        assert_eq!(loaded_config.default_profile, config.default_profile);
        assert_eq!(loaded_config.profiles.len(), 1);
        assert_eq!(loaded_config.get_profile("test"), config.get_profile("test"));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config = Config::load(Some(temp_dir.path().join("missing.toml")))
            .expect("missing file falls back to defaults");
        assert_eq!(config.default_profile, None);
        assert_eq!(config.profiles.len(), 0);
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "profiles = [").expect("write config");

        let result = Config::load(Some(config_path));
        assert!(matches!(result, Err(StorageError::ConfigParseError { .. })));
    }
}
