//! Client configuration, read from the environment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/";

#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the match service, always ending in `/`.
    pub api_url: String,

    /// Mode sent when creating a match.
    pub match_mode: String,

    /// Delay between an accepted move and the board update.
    pub animation: Duration,

    /// Per-request timeout for match service calls.
    pub http_timeout: Duration,

    /// Edge length of the GUI board in pixels.
    pub board_size: f32,

    /// External program that plays sound files. `None` disables audio.
    pub sound_player: Option<String>,

    pub move_sound: PathBuf,
    pub capture_sound: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            match_mode: "LOCAL".to_string(),
            animation: Duration::from_millis(100),
            http_timeout: Duration::from_secs(30),
            board_size: 736.0,
            sound_player: None,
            move_sound: PathBuf::from("assets/move.mp3"),
            capture_sound: PathBuf::from("assets/capture.mp3"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = match lookup("CHESS_API_URL") {
            Some(url) => normalize_base_url(&url)?,
            None => defaults.api_url,
        };

        let animation = parse_var::<u64, _>(&lookup, "CHESS_ANIMATION_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.animation);

        let http_timeout = parse_var::<u64, _>(&lookup, "CHESS_HTTP_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.http_timeout);

        let board_size = parse_var::<f32, _>(&lookup, "CHESS_BOARD_SIZE")?.unwrap_or(defaults.board_size);
        if !(board_size.is_finite() && board_size > 0.0) {
            return Err(Error::Config(format!("CHESS_BOARD_SIZE must be positive, got {board_size}")));
        }

        Ok(Self {
            api_url,
            match_mode: lookup("CHESS_MATCH_MODE").unwrap_or(defaults.match_mode),
            animation,
            http_timeout,
            board_size,
            sound_player: lookup("CHESS_SOUND_PLAYER").filter(|p| !p.trim().is_empty()),
            move_sound: lookup("CHESS_MOVE_SOUND").map(PathBuf::from).unwrap_or(defaults.move_sound),
            capture_sound: lookup("CHESS_CAPTURE_SOUND")
                .map(PathBuf::from)
                .unwrap_or(defaults.capture_sound),
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("{key} is not a valid number: {raw:?}"))),
        None => Ok(None),
    }
}

/// Validates a base URL and makes sure endpoint paths can be appended to it.
fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let url = reqwest::Url::parse(trimmed)
        .map_err(|e| Error::Config(format!("CHESS_API_URL {trimmed:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!("CHESS_API_URL {trimmed:?} cannot be a base URL")));
    }
    if trimmed.ends_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.match_mode, "LOCAL");
        assert_eq!(config.animation, Duration::from_millis(100));
        assert!(config.sound_player.is_none());
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = config_from(&[("CHESS_API_URL", "http://chess.test/api")]).unwrap();
        assert_eq!(config.api_url, "http://chess.test/api/");

        let config = config_from(&[("CHESS_API_URL", "http://chess.test/")]).unwrap();
        assert_eq!(config.api_url, "http://chess.test/");
    }

    #[test]
    fn test_malformed_values_are_errors() {
        assert!(config_from(&[("CHESS_API_URL", "not a url")]).is_err());
        assert!(config_from(&[("CHESS_ANIMATION_MS", "fast")]).is_err());
        assert!(config_from(&[("CHESS_BOARD_SIZE", "-3")]).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("CHESS_ANIMATION_MS", "250"),
            ("CHESS_SOUND_PLAYER", "paplay"),
            ("CHESS_MATCH_MODE", "ONLINE"),
        ])
        .unwrap();
        assert_eq!(config.animation, Duration::from_millis(250));
        assert_eq!(config.sound_player.as_deref(), Some("paplay"));
        assert_eq!(config.match_mode, "ONLINE");
    }
}
