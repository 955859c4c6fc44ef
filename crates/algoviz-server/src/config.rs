//! Server configuration from environment variables.

use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;

use algoviz_engine::Value;

use crate::error::{Error, Result};

/// Longest random sequence a sorting run may use. Sort traces grow
/// quadratically with length.
pub const MAX_ARRAY_LEN: usize = 1000;

/// Largest grid side a pathfinding run may use.
pub const MAX_GRID_SIDE: usize = 1000;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// HTTP API listen address
    pub api_addr: SocketAddr,
    /// Length of the random sequence handed to sorting runs
    pub array_len: usize,
    /// Smallest random value (inclusive)
    pub value_min: Value,
    /// Largest random value (inclusive)
    pub value_max: Value,
    /// Grid size for pathfinding runs
    pub grid_width: usize,
    pub grid_height: usize,
    /// Playback interval at 1x speed
    pub tick_ms: u64,
    /// Fixed RNG seed; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            array_len: 15,
            value_min: 5,
            value_max: 100,
            grid_width: 10,
            grid_height: 10,
            tick_ms: 1000,
            seed: None,
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            api_addr: parse_or(&lookup, "ALGOVIZ_API_ADDR", defaults.api_addr)?,
            array_len: parse_or(&lookup, "ALGOVIZ_ARRAY_LEN", defaults.array_len)?,
            value_min: parse_or(&lookup, "ALGOVIZ_VALUE_MIN", defaults.value_min)?,
            value_max: parse_or(&lookup, "ALGOVIZ_VALUE_MAX", defaults.value_max)?,
            grid_width: parse_or(&lookup, "ALGOVIZ_GRID_WIDTH", defaults.grid_width)?,
            grid_height: parse_or(&lookup, "ALGOVIZ_GRID_HEIGHT", defaults.grid_height)?,
            tick_ms: parse_or(&lookup, "ALGOVIZ_TICK_MS", defaults.tick_ms)?,
            seed: lookup("ALGOVIZ_SEED")
                .map(|raw| parse("ALGOVIZ_SEED", &raw))
                .transpose()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject combinations no run could use.
    pub fn validate(&self) -> Result<()> {
        if self.value_min > self.value_max {
            return Err(Error::Config(format!(
                "ALGOVIZ_VALUE_MIN ({}) is greater than ALGOVIZ_VALUE_MAX ({})",
                self.value_min, self.value_max
            )));
        }
        if self.array_len > MAX_ARRAY_LEN {
            return Err(Error::Config(format!(
                "ALGOVIZ_ARRAY_LEN ({}) exceeds the maximum of {MAX_ARRAY_LEN}",
                self.array_len
            )));
        }
        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            return Err(Error::Config(format!(
                "grid {}x{} exceeds the maximum of {MAX_GRID_SIDE}x{MAX_GRID_SIDE}",
                self.grid_width, self.grid_height
            )));
        }
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(Error::Config(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.tick_ms == 0 {
            return Err(Error::Config("ALGOVIZ_TICK_MS must be positive".to_string()));
        }
        Ok(())
    }
}

fn parse<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| Error::Config(format!("invalid {key} {raw:?}: {e}")))
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => parse(key, &raw),
        None => Ok(default),
    }
}
