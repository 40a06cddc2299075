//! Table configuration resolved from defaults, a TOML file, and the
//! environment.
//!
//! Precedence is environment over file over defaults. The file is named
//! by `RIVERLINE_CONFIG`; individual overrides are `RIVERLINE_STACK`,
//! `RIVERLINE_SEATS`, and `RIVERLINE_SEED`.

use riverline_engine::game::GameSettings;
use serde::{Deserialize, Serialize};
use std::fs;

/// Fully resolved table configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Chips each seat starts a session with.
    pub starting_stack: u32,
    /// Small blind posted left of the dealer.
    pub small_blind: u32,
    /// Big blind; also the minimum opening bet.
    pub big_blind: u32,
    /// Seats at the table (2-6).
    pub seats: usize,
    /// Deck seed applied when no `--seed` flag is given.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        let settings = GameSettings::default();
        Self {
            starting_stack: settings.starting_stack,
            small_blind: settings.small_blind,
            big_blind: settings.big_blind,
            seats: settings.seats,
            seed: None,
        }
    }
}

impl Config {
    /// Engine settings derived from this configuration. Command-line
    /// flags may still override the seat count afterwards.
    pub fn settings(&self) -> GameSettings {
        GameSettings {
            starting_stack: self.starting_stack,
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            seats: self.seats,
        }
    }
}

/// Where a resolved configuration value came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

/// Per-field provenance for a resolved [`Config`].
#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub starting_stack: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub seats: ValueSource,
    pub seed: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_stack: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            seats: ValueSource::Default,
            seed: ValueSource::Default,
        }
    }
}

/// A resolved configuration together with value provenance.
#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

/// Errors raised while loading or validating configuration.
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

impl std::error::Error for ConfigError {}

/// On-disk shape of the TOML file; every field is optional so a file
/// can override just the values it cares about.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    seats: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
}

/// Loads the configuration, discarding provenance.
pub fn load() -> Result<Config, ConfigError> {
    Ok(load_with_sources()?.config)
}

/// Loads the configuration and records where each value came from.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut config = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("RIVERLINE_CONFIG")
        && !path.is_empty()
    {
        let raw = fs::read_to_string(&path)?;
        let file: FileConfig = toml::from_str(&raw)?;
        if let Some(v) = file.starting_stack {
            config.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = file.small_blind {
            config.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = file.big_blind {
            config.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = file.seats {
            config.seats = v;
            sources.seats = ValueSource::File;
        }
        if let Some(v) = file.seed {
            config.seed = Some(v);
            sources.seed = ValueSource::File;
        }
    }

    if let Ok(v) = std::env::var("RIVERLINE_STACK")
        && !v.is_empty()
    {
        config.starting_stack = v
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("RIVERLINE_STACK is not a number: {}", v)))?;
        sources.starting_stack = ValueSource::Env;
    }
    if let Ok(v) = std::env::var("RIVERLINE_SEATS")
        && !v.is_empty()
    {
        config.seats = v
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("RIVERLINE_SEATS is not a number: {}", v)))?;
        sources.seats = ValueSource::Env;
    }
    if let Ok(v) = std::env::var("RIVERLINE_SEED")
        && !v.is_empty()
    {
        let seed = v
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("RIVERLINE_SEED is not a number: {}", v)))?;
        config.seed = Some(seed);
        sources.seed = ValueSource::Env;
    }

    validate(&config)?;
    Ok(ConfigResolved { config, sources })
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.starting_stack == 0 {
        return Err(ConfigError::Invalid(
            "starting_stack must be greater than zero".to_string(),
        ));
    }
    if !(2..=6).contains(&config.seats) {
        return Err(ConfigError::Invalid(format!(
            "seats must be between 2 and 6, got {}",
            config.seats
        )));
    }
    if config.small_blind == 0 || config.big_blind <= config.small_blind {
        return Err(ConfigError::Invalid(format!(
            "blinds must satisfy 0 < small < big, got {}/{}",
            config.small_blind, config.big_blind
        )));
    }
    if config.starting_stack < config.big_blind {
        return Err(ConfigError::Invalid(format!(
            "starting_stack {} cannot cover the big blind {}",
            config.starting_stack, config.big_blind
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write as _;

    const VARS: &[&str] = &[
        "RIVERLINE_CONFIG",
        "RIVERLINE_STACK",
        "RIVERLINE_SEATS",
        "RIVERLINE_SEED",
    ];

    fn clear_env() {
        for var in VARS {
            unsafe { std::env::remove_var(var) };
        }
    }

    fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }

    #[test]
    fn defaults_match_the_engine() {
        let config = Config::default();
        assert_eq!(config.settings(), GameSettings::default());
        assert_eq!(config.seed, None);
    }

    #[test]
    fn file_shape_is_fully_optional() {
        let file: FileConfig = toml::from_str("").unwrap();
        assert!(file.starting_stack.is_none());
        assert!(file.seed.is_none());

        let file: FileConfig = toml::from_str("seats = 3\nseed = 99").unwrap();
        assert_eq!(file.seats, Some(3));
        assert_eq!(file.seed, Some(99));
        assert!(file.big_blind.is_none());
    }

    #[test]
    fn validation_rejects_broken_tables() {
        let config = Config {
            seats: 7,
            ..Config::default()
        };
        assert!(validate(&config).is_err());

        let config = Config {
            small_blind: 200,
            ..Config::default()
        };
        assert!(validate(&config).is_err());

        let config = Config {
            starting_stack: 50,
            ..Config::default()
        };
        assert!(validate(&config).is_err());

        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    #[serial]
    fn env_free_load_returns_defaults() {
        clear_env();
        let resolved = load_with_sources().unwrap();
        assert_eq!(resolved.config, Config::default());
        assert_eq!(resolved.sources.seats, ValueSource::Default);
    }

    #[test]
    #[serial]
    fn file_values_apply_and_are_tracked() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "starting_stack = 5000\nseats = 4").unwrap();
        set_env("RIVERLINE_CONFIG", file.path().to_str().unwrap());

        let resolved = load_with_sources().unwrap();
        assert_eq!(resolved.config.starting_stack, 5000);
        assert_eq!(resolved.config.seats, 4);
        assert_eq!(resolved.config.big_blind, 100);
        assert_eq!(resolved.sources.starting_stack, ValueSource::File);
        assert_eq!(resolved.sources.big_blind, ValueSource::Default);
        clear_env();
    }

    #[test]
    #[serial]
    fn env_beats_file() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "starting_stack = 5000").unwrap();
        set_env("RIVERLINE_CONFIG", file.path().to_str().unwrap());
        set_env("RIVERLINE_STACK", "7777");
        set_env("RIVERLINE_SEED", "31");

        let resolved = load_with_sources().unwrap();
        assert_eq!(resolved.config.starting_stack, 7777);
        assert_eq!(resolved.config.seed, Some(31));
        assert_eq!(resolved.sources.starting_stack, ValueSource::Env);
        assert_eq!(resolved.sources.seed, ValueSource::Env);
        clear_env();
    }

    #[test]
    #[serial]
    fn invalid_file_values_fail_validation() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seats = 11").unwrap();
        set_env("RIVERLINE_CONFIG", file.path().to_str().unwrap());

        let result = load();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
        clear_env();
    }

    #[test]
    #[serial]
    fn unparsable_env_override_is_reported() {
        clear_env();
        set_env("RIVERLINE_SEATS", "many");
        let result = load();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
        clear_env();
    }
}
