use handparse_engine::{ParserConfig, TrackingMode};
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_PATH_VAR: &str = "HANDPARSE_CONFIG";
pub const PLAYER_VAR: &str = "HANDPARSE_PLAYER";
/// Name used by `.env` files written for the original tooling.
pub const LEGACY_PLAYER_VAR: &str = "PLAYER_NAME";
pub const FOLLOW_VAR: &str = "HANDPARSE_FOLLOW_SEAT_NAMES";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// Player whose hole cards are attached; empty when not configured
    pub player_name: String,
    /// Let seat lines overwrite the tracked name (legacy behavior)
    pub follow_seat_names: bool,
}

impl Config {
    /// Engine configuration, failing when no player name was supplied.
    pub fn parser_config(&self) -> Result<ParserConfig, ConfigError> {
        if self.player_name.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "player name is not set (use --player, {} or {})",
                PLAYER_VAR, LEGACY_PLAYER_VAR
            )));
        }
        let tracking = if self.follow_seat_names {
            TrackingMode::FollowSeatLines
        } else {
            TrackingMode::Fixed
        };
        Ok(ParserConfig::new(self.player_name.clone()).with_tracking(tracking))
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Cli,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub player_name: ValueSource,
    pub follow_seat_names: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            player_name: ValueSource::Default,
            follow_seat_names: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

/// Values given on the command line; they win over file and environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub player: Option<String>,
    pub follow_seat_names: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    load_with_overrides(&ConfigOverrides::default())
}

pub fn load_with_overrides(overrides: &ConfigOverrides) -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_PATH_VAR)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.player_name {
            cfg.player_name = v;
            sources.player_name = ValueSource::File;
        }
        if let Some(v) = f.follow_seat_names {
            cfg.follow_seat_names = v;
            sources.follow_seat_names = ValueSource::File;
        }
    }

    let player = [PLAYER_VAR, LEGACY_PLAYER_VAR]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|v| !v.is_empty());
    if let Some(name) = player {
        cfg.player_name = name;
        sources.player_name = ValueSource::Env;
    }
    if let Ok(follow) = std::env::var(FOLLOW_VAR)
        && !follow.is_empty()
    {
        cfg.follow_seat_names = parse_bool(&follow)
            .ok_or_else(|| ConfigError::Invalid(format!("Invalid {}", FOLLOW_VAR)))?;
        sources.follow_seat_names = ValueSource::Env;
    }

    if let Some(name) = &overrides.player {
        cfg.player_name = name.clone();
        sources.player_name = ValueSource::Cli;
    }
    if overrides.follow_seat_names {
        cfg.follow_seat_names = true;
        sources.follow_seat_names = ValueSource::Cli;
    }

    cfg.player_name = cfg.player_name.trim().to_string();
    validate(&cfg, &sources)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    player_name: Option<String>,
    #[serde(default)]
    follow_seat_names: Option<bool>,
}

fn validate(cfg: &Config, sources: &ConfigSources) -> Result<(), ConfigError> {
    // An explicitly supplied but blank name is a mistake, not "unset"
    if cfg.player_name.is_empty() && sources.player_name != ValueSource::Default {
        return Err(ConfigError::Invalid(
            "Invalid configuration: player_name must not be blank".into(),
        ));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
