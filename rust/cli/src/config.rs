use serde::{Deserialize, Serialize};
use std::fs;

use pokermachine_engine::config::GameConfig;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub packs: u8,
    pub base_stake: u64,
    pub min_wager_percent: u64,
    pub killer_frequency: u64,
    pub killer_penalty_cap: u32,
    pub killer_win_multiplier: u64,
    pub data_file: String,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub packs: ValueSource,
    pub base_stake: ValueSource,
    pub min_wager_percent: ValueSource,
    pub killer_frequency: ValueSource,
    pub killer_penalty_cap: ValueSource,
    pub killer_win_multiplier: ValueSource,
    pub data_file: ValueSource,
    pub seed: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            packs: ValueSource::Default,
            base_stake: ValueSource::Default,
            min_wager_percent: ValueSource::Default,
            killer_frequency: ValueSource::Default,
            killer_penalty_cap: ValueSource::Default,
            killer_win_multiplier: ValueSource::Default,
            data_file: ValueSource::Default,
            seed: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        let game = GameConfig::default();
        Self {
            packs: game.packs,
            base_stake: game.base_stake,
            min_wager_percent: game.min_wager_percent,
            killer_frequency: game.killer_frequency,
            killer_penalty_cap: game.killer_penalty_cap,
            killer_win_multiplier: game.killer_win_multiplier,
            data_file: "pokermachine_stats.json".into(),
            seed: None,
        }
    }
}

impl Config {
    /// Engine parameters with the CLI-tunable fields applied; anything the
    /// CLI does not expose keeps its engine default.
    pub fn to_game_config(&self) -> GameConfig {
        GameConfig {
            packs: self.packs,
            base_stake: self.base_stake,
            min_wager_percent: self.min_wager_percent,
            killer_frequency: self.killer_frequency,
            killer_penalty_cap: self.killer_penalty_cap,
            killer_win_multiplier: self.killer_win_multiplier,
            ..GameConfig::default()
        }
    }
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
        write!(f, "{:?}", self)
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("pokermachine_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.packs {
            cfg.packs = v;
            sources.packs = ValueSource::File;
        }
        if let Some(v) = f.base_stake {
            cfg.base_stake = v;
            sources.base_stake = ValueSource::File;
        }
        if let Some(v) = f.min_wager_percent {
            cfg.min_wager_percent = v;
            sources.min_wager_percent = ValueSource::File;
        }
        if let Some(v) = f.killer_frequency {
            cfg.killer_frequency = v;
            sources.killer_frequency = ValueSource::File;
        }
        if let Some(v) = f.killer_penalty_cap {
            cfg.killer_penalty_cap = v;
            sources.killer_penalty_cap = ValueSource::File;
        }
        if let Some(v) = f.killer_win_multiplier {
            cfg.killer_win_multiplier = v;
            sources.killer_win_multiplier = ValueSource::File;
        }
        if let Some(v) = f.data_file {
            cfg.data_file = v;
            sources.data_file = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("pokermachine_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(packs) = std::env::var("pokermachine_PACKS")
        && !packs.is_empty()
    {
        cfg.packs = packs
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid packs".into()))?;
        sources.packs = ValueSource::Env;
    }
    if let Ok(data) = std::env::var("pokermachine_DATA")
        && !data.is_empty()
    {
        cfg.data_file = data;
        sources.data_file = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    packs: Option<u8>,
    #[serde(default)]
    base_stake: Option<u64>,
    #[serde(default)]
    min_wager_percent: Option<u64>,
    #[serde(default)]
    killer_frequency: Option<u64>,
    #[serde(default)]
    killer_penalty_cap: Option<u32>,
    #[serde(default)]
    killer_win_multiplier: Option<u64>,
    #[serde(default)]
    data_file: Option<String>,
    #[serde(default)]
    seed: Option<u64>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.to_game_config()
        .validate()
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;
    if cfg.data_file.is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: data_file must not be empty".into(),
        ));
    }
    Ok(())
}
