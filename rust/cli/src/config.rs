//! Layered configuration: defaults, then the TOML file named by
//! `DURAK_CONFIG`, then `DURAK_*` environment variables. Command-line flags
//! are applied on top by the command handlers.

use durak_engine::engine::{DEFAULT_HAND_SIZE, GameConfig};
use durak_engine::round::TransitionRule;
use durak_engine::table::DEFAULT_SLOTS;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub slots: usize,
    pub hand_size: usize,
    pub rule: TransitionRule,
    pub bot: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub slots: ValueSource,
    pub hand_size: ValueSource,
    pub rule: ValueSource,
    pub bot: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            slots: ValueSource::Default,
            hand_size: ValueSource::Default,
            rule: ValueSource::Default,
            bot: ValueSource::Default,
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
        Self {
            seed: None,
            slots: DEFAULT_SLOTS,
            hand_size: DEFAULT_HAND_SIZE,
            rule: TransitionRule::Standard,
            bot: "random".into(),
        }
    }
}

impl Config {
    /// Applies command-line flags, which take precedence over every other source.
    pub fn with_overrides(
        mut self,
        seed: Option<u64>,
        bot: Option<&str>,
        rule: Option<TransitionRule>,
    ) -> Self {
        if let Some(seed) = seed {
            self.seed = Some(seed);
        }
        if let Some(bot) = bot {
            self.bot = bot.to_string();
        }
        if let Some(rule) = rule {
            self.rule = rule;
        }
        self
    }

    /// Engine configuration for one match played with `seed`.
    pub fn game_config(&self, seed: u64) -> GameConfig {
        GameConfig {
            slots: self.slots,
            hand_size: self.hand_size,
            transition: self.rule,
            seed: Some(seed),
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
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("DURAK_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.slots {
            cfg.slots = v;
            sources.slots = ValueSource::File;
        }
        if let Some(v) = f.hand_size {
            cfg.hand_size = v;
            sources.hand_size = ValueSource::File;
        }
        if let Some(v) = f.rule {
            cfg.rule = v
                .parse()
                .map_err(|e: String| ConfigError::Invalid(format!("Invalid rule: {}", e)))?;
            sources.rule = ValueSource::File;
        }
        if let Some(v) = f.bot {
            cfg.bot = v;
            sources.bot = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("DURAK_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(slots) = std::env::var("DURAK_SLOTS")
        && !slots.is_empty()
    {
        cfg.slots = slots
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid slots".into()))?;
        sources.slots = ValueSource::Env;
    }
    if let Ok(size) = std::env::var("DURAK_HAND_SIZE")
        && !size.is_empty()
    {
        cfg.hand_size = size
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid hand size".into()))?;
        sources.hand_size = ValueSource::Env;
    }
    if let Ok(rule) = std::env::var("DURAK_RULE")
        && !rule.is_empty()
    {
        cfg.rule = rule
            .parse()
            .map_err(|e: String| ConfigError::Invalid(format!("Invalid rule: {}", e)))?;
        sources.rule = ValueSource::Env;
    }
    if let Ok(bot) = std::env::var("DURAK_BOT")
        && !bot.is_empty()
    {
        cfg.bot = bot;
        sources.bot = ValueSource::Env;
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
    seed: Option<u64>,
    #[serde(default)]
    slots: Option<usize>,
    #[serde(default)]
    hand_size: Option<usize>,
    #[serde(default)]
    rule: Option<String>,
    #[serde(default)]
    bot: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.slots == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: slots must be >=1".into(),
        ));
    }
    if cfg.hand_size == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: hand_size must be >=1".into(),
        ));
    }
    if !durak_ai::STRATEGIES.contains(&cfg.bot.as_str()) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: unknown bot '{}'",
            cfg.bot
        )));
    }
    Ok(())
}
