//! Configuration module for the instant-search client.
//!
//! Values come from an optional TOML file, overridden by environment
//! variables (a `.env` file is loaded first by `main`).

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use fundu::{DurationParser, TimeUnit};
use serde::{Deserialize, Deserializer};
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::lookup::CacheCapacities;

const API_KEY_VAR: &str = "OMDB_API_KEY";

#[derive(custom_debug_derive::Debug, Clone, Deserialize)]
pub struct Config {
    /// Log level for this crate's targets when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[debug(skip)]
    pub omdb_api_key: String,
    #[serde(default = "default_base_url")]
    pub omdb_base_url: String,
    #[serde(default = "default_capacity")]
    pub search_cache_capacity: usize,
    #[serde(default = "default_capacity")]
    pub details_cache_capacity: usize,
    /// Shortest query that is sent to the catalog, in characters.
    #[serde(default = "default_min_search_length")]
    pub min_search_length: usize,
    /// Quiet period after the last keystroke before a search fires.
    #[serde(
        default = "default_debounce_interval",
        deserialize_with = "deserialize_duration"
    )]
    pub debounce_interval: Duration,
    #[serde(
        default = "default_request_timeout",
        deserialize_with = "deserialize_duration"
    )]
    pub request_timeout: Duration,
    /// Image shown for results without a poster.
    #[serde(default = "default_poster")]
    pub default_poster: String,
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_base_url() -> String {
    crate::omdb::DEFAULT_BASE_URL.to_owned()
}

fn default_capacity() -> usize {
    crate::cache::DEFAULT_CAPACITY.get()
}

fn default_min_search_length() -> usize {
    3
}

fn default_debounce_interval() -> Duration {
    Duration::from_millis(500)
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_poster() -> String {
    "defaults/defaultPoster.gif".to_owned()
}

impl Config {
    /// Load from `file` (if given) and the process environment.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = file {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            figment = figment.merge(Toml::file(path));
        }

        // `Env` parses values, so an all-digit key would arrive as an integer.
        figment = figment.merge(Env::raw().ignore(&[API_KEY_VAR]));
        if let Ok(key) = std::env::var(API_KEY_VAR) {
            figment = figment.merge(Serialized::default("omdb_api_key", key));
        }
        Self::from_figment(figment)
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract().context("Failed to load config")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.omdb_api_key.trim().is_empty() {
            bail!("omdb_api_key must not be empty");
        }
        self.base_url()?;
        self.cache_capacities()?;
        Ok(())
    }

    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.omdb_base_url)
            .with_context(|| format!("Invalid omdb_base_url: {}", self.omdb_base_url))
    }

    pub fn cache_capacities(&self) -> Result<CacheCapacities> {
        let search = NonZeroUsize::new(self.search_cache_capacity)
            .context("search_cache_capacity must be at least 1")?;
        let details = NonZeroUsize::new(self.details_cache_capacity)
            .context("details_cache_capacity must be at least 1")?;
        Ok(CacheCapacities { search, details })
    }
}

/// Parse a duration such as `500ms`, `2s` or `1m`. Bare numbers are milliseconds.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let input = input.trim();
    if let Ok(ms) = input.parse::<u64>() {
        return Ok(Duration::from_millis(ms));
    }

    let parser =
        DurationParser::with_time_units(&[TimeUnit::MilliSecond, TimeUnit::Second, TimeUnit::Minute]);
    let parsed = parser
        .parse(input)
        .map_err(|e| format!("invalid duration '{input}': {e}"))?;
    Duration::try_from(parsed).map_err(|e| format!("invalid duration '{input}': {e}"))
}

fn deserialize_duration<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Millis(ms) => Ok(Duration::from_millis(ms)),
        Raw::Text(text) => parse_duration(&text).map_err(serde::de::Error::custom),
    }
}
