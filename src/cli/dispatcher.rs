use crate::api::client::{DEFAULT_TIMEOUT_SECS, PugClient};
use crate::api::models::ApiResult;
use crate::cli::main_types::{Commands, ConfigCommands, MapCommands, PlayerCommands, PugCommands};
use crate::display::TableDisplay;
use crate::error::{AppError, CliError, ConfigError};
use crate::storage::config::{Config, DEFAULT_PROFILE, Profile};
use crate::storage::credentials::{API_KEY_ENV, get_api_key};
use log::{debug, warn};
use serde_json::Value;
use std::path::PathBuf;

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    profile_name: String,
    api_key: Option<String>,
    url_override: Option<String>,
    json: bool,
}

impl Dispatcher {
    pub fn new(config: Config, profile_name: String, api_key: Option<String>) -> Self {
        Self {
            config,
            config_path: None,
            profile_name,
            api_key,
            url_override: None,
            json: false,
        }
    }

    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url_override = url;
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub async fn dispatch(&mut self, command: Commands) -> Result<(), AppError> {
        let result = match command {
            Commands::Config { command } => return self.handle_config_command(command),
            Commands::Player { command } => self.handle_player_command(command).await?,
            Commands::Pug { command } => self.handle_pug_command(command).await?,
            Commands::Map { command } => self.handle_map_command(command).await?,
        };

        if result.code().is_error() {
            warn!("server refused the request: {}", result.code());
        }
        println!("{}", self.render(&result));
        Ok(())
    }

    /// Built-in defaults apply only while no profile has been configured.
    fn profile(&self) -> Result<Profile, ConfigError> {
        match self.config.get_profile(&self.profile_name) {
            Some(profile) => Ok(profile.clone()),
            None if self.profile_name == DEFAULT_PROFILE && self.config.profiles.is_empty() => {
                Ok(Profile::default())
            }
            None => Err(ConfigError::ProfileNotFound {
                name: self.profile_name.clone(),
            }),
        }
    }

    fn client(&self) -> Result<PugClient, AppError> {
        let profile = self.profile()?;
        let api_url = self.url_override.clone().unwrap_or(profile.api_url);
        let timeout = profile.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS);

        let api_key = get_api_key(self.api_key.as_deref()).ok_or_else(|| CliError::ApiKeyRequired {
            hint: format!("Pass --api-key or set {}", API_KEY_ENV),
        })?;

        debug!(
            "Using profile '{}' at {} (timeout {}s)",
            self.profile_name, api_url, timeout
        );
        Ok(PugClient::with_timeout(api_url, api_key, timeout)?)
    }

    fn render(&self, result: &ApiResult) -> String {
        if self.json {
            format!("{:#}", Value::Object(result.data().clone()))
        } else {
            TableDisplay::new().render_result(result)
        }
    }

    async fn handle_player_command(&self, command: PlayerCommands) -> Result<ApiResult, AppError> {
        debug!("player command: {:?}", command);
        let client = self.client()?;
        let result = match command {
            PlayerCommands::Add {
                steam_id,
                name,
                size,
                pug,
            } => client.add_player(steam_id, &name, size, pug).await?,
            PlayerCommands::Remove { steam_id } => client.remove_player(steam_id).await?,
            PlayerCommands::List { pug_id } => client.list_pug_players(pug_id).await?,
        };
        Ok(result)
    }

    async fn handle_pug_command(&self, command: PugCommands) -> Result<ApiResult, AppError> {
        debug!("pug command: {:?}", command);
        let client = self.client()?;
        let result = match command {
            PugCommands::Create {
                steam_id,
                name,
                size,
                map,
            } => {
                client
                    .create_pug(steam_id, &name, size, map.as_deref())
                    .await?
            }
            PugCommands::End { pug_id } => client.end_pug(pug_id).await?,
            PugCommands::List => client.list_pugs().await?,
            PugCommands::Status { pug_id } => client.pug_status(pug_id).await?,
        };
        Ok(result)
    }

    async fn handle_map_command(&self, command: MapCommands) -> Result<ApiResult, AppError> {
        debug!("map command: {:?}", command);
        let client = self.client()?;
        let result = match command {
            MapCommands::Vote { steam_id, map } => client.add_map_vote(steam_id, &map).await?,
            MapCommands::Force { pug_id, map } => client.force_map(pug_id, &map).await?,
        };
        Ok(result)
    }

    fn handle_config_command(&mut self, command: ConfigCommands) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                println!("Current Configuration:");
                println!("=====================");

                match &self.config.default_profile {
                    Some(default_profile) => println!("Default Profile: {}", default_profile),
                    None => println!("Default Profile: (not set)"),
                }
                println!("Active Profile: {}", self.profile_name);

                println!("\nProfiles:");
                if self.config.profiles.is_empty() {
                    println!("  No profiles configured");
                } else {
                    let mut names: Vec<&String> = self.config.profiles.keys().collect();
                    names.sort();
                    for name in names {
                        let profile = &self.config.profiles[name];
                        println!("  [{}]", name);
                        println!("    API URL: {}", profile.api_url);
                        if let Some(timeout) = profile.timeout_seconds {
                            println!("    Timeout: {} seconds", timeout);
                        }
                    }
                }

                let key_state = if get_api_key(self.api_key.as_deref()).is_some() {
                    "set"
                } else {
                    "not set"
                };
                println!("\nAPI Key: ({})", key_state);
                Ok(())
            }
            ConfigCommands::Set { key, value } => {
                debug!("config set {} = {} on '{}'", key, value, self.profile_name);
                self.config.set_value(&self.profile_name, &key, &value)?;
                self.config.save(self.config_path.clone())?;
                println!("✅ Set {} for profile '{}'", key, self.profile_name);
                Ok(())
            }
        }
    }
}
