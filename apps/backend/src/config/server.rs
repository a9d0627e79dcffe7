use std::env;
use std::time::Duration;

use crate::domain::MAX_PLAYERS;
use crate::error::AppError;

/// Runtime settings for the multiplayer server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seats per room.
    pub max_players: usize,
    /// How long a completed trick stays on the table.
    pub trick_clear_delay: Duration,
    /// Same, when the trick was completed by an admin skip.
    pub admin_trick_clear_delay: Duration,
    /// Rooms with nobody connected are evicted after this long. `None`
    /// keeps rooms for the life of the process.
    pub room_idle_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            max_players: MAX_PLAYERS,
            trick_clear_delay: Duration::from_millis(1500),
            admin_trick_clear_delay: Duration::from_millis(500),
            room_idle_timeout: None,
        }
    }
}

impl ServerConfig {
    /// Read `BISCA_*` variables from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("BISCA_HOST").unwrap_or(defaults.host);
        let port = parse_or("BISCA_PORT", lookup("BISCA_PORT"), defaults.port)?;

        let max_players = parse_or(
            "BISCA_MAX_PLAYERS",
            lookup("BISCA_MAX_PLAYERS"),
            defaults.max_players,
        )?;
        if !(2..=MAX_PLAYERS).contains(&max_players) {
            return Err(AppError::config(format!(
                "BISCA_MAX_PLAYERS must be between 2 and {MAX_PLAYERS}, got {max_players}"
            )));
        }

        let trick_clear_ms = parse_or(
            "BISCA_TRICK_CLEAR_MS",
            lookup("BISCA_TRICK_CLEAR_MS"),
            defaults.trick_clear_delay.as_millis() as u64,
        )?;
        let admin_trick_clear_ms = parse_or(
            "BISCA_ADMIN_TRICK_CLEAR_MS",
            lookup("BISCA_ADMIN_TRICK_CLEAR_MS"),
            defaults.admin_trick_clear_delay.as_millis() as u64,
        )?;

        let room_idle_timeout = match lookup("BISCA_ROOM_IDLE_SECS") {
            Some(raw) => Some(Duration::from_secs(parse("BISCA_ROOM_IDLE_SECS", &raw)?)),
            None => None,
        };

        Ok(Self {
            host,
            port,
            max_players,
            trick_clear_delay: Duration::from_millis(trick_clear_ms),
            admin_trick_clear_delay: Duration::from_millis(admin_trick_clear_ms),
            room_idle_timeout,
        })
    }
}

fn parse<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::config(format!("{key} has an invalid value: '{raw}'")))
}

fn parse_or<T: std::str::FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T, AppError> {
    match raw {
        Some(raw) => parse(key, &raw),
        None => Ok(default),
    }
}
