//! YAML configuration, mirroring spec.md §6's schema exactly
//! (`lexicon.ngram`, `redis.*`, `xmlrpc.*`).

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "default.yaml";
const ENV_VAR: &str = "LOSO_CONFIG_FILE";

#[derive(Debug, Clone, Deserialize)]
pub struct LexiconConfig {
    #[serde(default = "default_ngram")]
    pub ngram: u32,
}

fn default_ngram() -> u32 {
    4
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self { ngram: default_ngram() }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RedisConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub db: Option<u32>,
}

impl RedisConfig {
    pub fn url(&self) -> String {
        let host = self.host.as_deref().unwrap_or("127.0.0.1");
        let port = self.port.unwrap_or(6379);
        let db = self.db.unwrap_or(0);
        format!("redis://{host}:{port}/{db}")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct XmlRpcConfig {
    #[serde(default = "default_interface")]
    pub interface: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_interface() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5566
}

impl Default for XmlRpcConfig {
    fn default() -> Self {
        Self { interface: default_interface(), port: default_port() }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub lexicon: LexiconConfig,
    #[serde(default)]
    pub redis: RedisConfig,
    #[serde(default)]
    pub xmlrpc: XmlRpcConfig,
}

impl Config {
    /// Load from `path`, or — if not given — the path named by
    /// `LOSO_CONFIG_FILE`, or `default.yaml` if neither is set.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let resolved = Self::resolve_path(path);
        let text = std::fs::read_to_string(&resolved)
            .with_context(|| format!("reading config file {}", resolved.display()))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config file {}", resolved.display()))
    }

    fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = env::var(ENV_VAR) {
            return PathBuf::from(p);
        }
        PathBuf::from(DEFAULT_CONFIG_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicon_ngram_defaults_to_four() {
        let cfg: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(cfg.lexicon.ngram, 4);
    }

    #[test]
    fn xmlrpc_defaults_match_spec() {
        let cfg: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(cfg.xmlrpc.interface, "0.0.0.0");
        assert_eq!(cfg.xmlrpc.port, 5566);
    }

    #[test]
    fn parses_full_config() {
        let yaml = r#"
lexicon:
  ngram: 3
redis:
  host: db.internal
  port: 6380
  db: 2
xmlrpc:
  interface: 127.0.0.1
  port: 9000
"#;
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.lexicon.ngram, 3);
        assert_eq!(cfg.redis.url(), "redis://db.internal:6380/2");
        assert_eq!(cfg.xmlrpc.port, 9000);
    }
}
