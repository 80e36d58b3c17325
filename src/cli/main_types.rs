use crate::api::params::DEFAULT_PUG_SIZE;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pug-cli")]
#[command(about = "Command line client for the TF2 pick-up-game API")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    /// API key for the pug server
    #[arg(long, global = true, env = "PUG_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the profile's API URL
    #[arg(long, global = true, env = "PUG_API_URL")]
    pub url: Option<String>,

    /// Print the raw JSON response instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add, remove and list players
    Player {
        #[command(subcommand)]
        command: PlayerCommands,
    },
    /// Create, end and inspect pugs
    Pug {
        #[command(subcommand)]
        command: PugCommands,
    },
    /// Map voting
    Map {
        #[command(subcommand)]
        command: MapCommands,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum PlayerCommands {
    /// Add a player to a pug
    Add {
        /// Player's Steam ID
        steam_id: u64,
        /// Player's display name
        name: String,
        /// Size of the pug to join
        #[arg(long, default_value_t = DEFAULT_PUG_SIZE)]
        size: u32,
        /// Join this pug instead of letting the server choose
        #[arg(long)]
        pug: Option<u64>,
    },
    /// Remove a player from their pug
    Remove {
        /// Player's Steam ID
        steam_id: u64,
    },
    /// List the players in a pug
    List {
        /// Pug ID
        pug_id: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum PugCommands {
    /// Create a new pug
    Create {
        /// Steam ID of the player starting the pug
        steam_id: u64,
        /// Name of the player starting the pug
        name: String,
        /// Number of players
        #[arg(long, default_value_t = DEFAULT_PUG_SIZE)]
        size: u32,
        /// Lock the pug to this map
        #[arg(long)]
        map: Option<String>,
    },
    /// End a pug
    End {
        /// Pug ID
        pug_id: u64,
    },
    /// List running pugs
    List,
    /// Show the status of a pug
    Status {
        /// Pug ID
        pug_id: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum MapCommands {
    /// Vote for a map
    Vote {
        /// Steam ID of the voting player
        steam_id: u64,
        /// Map name
        map: String,
    },
    /// Force a pug's map before voting starts
    Force {
        /// Pug ID
        pug_id: u64,
        /// Map name
        map: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key (api_url, timeout_seconds)
        key: String,
        /// Configuration value
        value: String,
    },
}
