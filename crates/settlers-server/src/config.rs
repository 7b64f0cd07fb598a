//! Server configuration from the environment.

use anyhow::{bail, Context};
use settlers_core::{GameConfig, GameMode};
use std::net::SocketAddr;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Settings for every room created on this server
    pub game: GameConfig,
}

impl ServerConfig {
    /// Read `SERVER_ADDR`, `GAME_MODE` and `TARGET_VICTORY_POINTS`
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let addr = lookup("SERVER_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.into())
            .parse()
            .context("SERVER_ADDR must be host:port")?;

        let mode = match lookup("GAME_MODE").as_deref() {
            None | Some("standard") => GameMode::Standard,
            Some("quick") => GameMode::Quick,
            Some(other) => bail!("unknown GAME_MODE {other:?}, expected standard or quick"),
        };

        let target_victory_points = lookup("TARGET_VICTORY_POINTS")
            .map(|v| v.parse::<u32>())
            .transpose()
            .context("TARGET_VICTORY_POINTS must be a number")?;

        Ok(Self {
            addr,
            game: GameConfig {
                mode,
                target_victory_points,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr, DEFAULT_ADDR.parse().unwrap());
        assert_eq!(config.game.target(), 10);
    }

    #[test]
    fn test_quick_mode_with_override() {
        let config = ServerConfig::from_lookup(lookup(&[("GAME_MODE", "quick")])).unwrap();
        assert_eq!(config.game.target(), 8);

        let config = ServerConfig::from_lookup(lookup(&[
            ("GAME_MODE", "quick"),
            ("TARGET_VICTORY_POINTS", "12"),
        ]))
        .unwrap();
        assert_eq!(config.game.target(), 12);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(ServerConfig::from_lookup(lookup(&[("GAME_MODE", "marathon")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("TARGET_VICTORY_POINTS", "ten")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("SERVER_ADDR", "nowhere")])).is_err());
    }
}
