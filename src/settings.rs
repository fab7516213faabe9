use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

lazy_static! {
    /// Optional `Settings.{toml,json,yaml}` overlaid with `SNITCH_*` variables.
    pub static ref CONFIG: Result<Config, ConfigError> = build_config("Settings");
}

pub fn build_config(basename: &str) -> Result<Config, ConfigError> {
    Config::builder()
        .set_default("elo_changes_dir", "data/elo_changes")?
        .set_default("elo_file_prefix", "elo_changes_")?
        .set_default("winrate_dir", "data/winrate")?
        .set_default("winrate_file_prefix", "winrate_solo")?
        .set_default("log_level", "info")?
        .set_default("server_address", "127.0.0.1")?
        .set_default("server_port", 8000)?
        .set_default("watch_interval_secs", 300)?
        .set_default(
            "startup_message",
            "*TEST MESSAGE FROM ELO SNITCH BOT*\n\nThis is a test message to verify the bot is working correctly.",
        )?
        .add_source(File::with_name(basename).required(false))
        .add_source(Environment::with_prefix("SNITCH"))
        .build()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub elo_changes_dir: PathBuf,
    pub elo_file_prefix: Option<String>,
    /// Regex over file names, replaces the prefix filter when set.
    pub elo_file_pattern: Option<String>,
    pub winrate_dir: PathBuf,
    pub winrate_file_prefix: Option<String>,
    pub winrate_file_pattern: Option<String>,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub server_address: String,
    pub server_port: u16,
    /// Chat gateway accepting `{chat_id, text}` posts. Relaying is off without it.
    pub gateway_url: Option<String>,
    pub group_chat_id: Option<String>,
    pub watch_interval_secs: u64,
    pub startup_message: String,
}

impl Settings {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.clone().try_deserialize()
    }

    pub fn load() -> Result<Self, ConfigError> {
        match &*CONFIG {
            Ok(config) => Settings::from_config(config),
            Err(e) => Err(ConfigError::Message(e.to_string())),
        }
    }
}
