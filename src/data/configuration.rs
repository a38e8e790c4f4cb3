use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Deserialize, Serialize, Default, Debug, Clone, PartialEq)]
pub struct Configuration {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerSettings,
}

impl Configuration {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration from {}", path.display()))?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        toml::from_str(raw).context("failed to parse configuration")
    }
}

#[derive(Deserialize, Serialize, Default, Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// Directory that holds `db.sqlite`, or `:memory:`.
    pub path: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_section_is_optional() {
        let config = Configuration::parse("[database]\npath = \"./data\"\n").unwrap();
        assert_eq!(config.database.path, "./data");
        assert_eq!(config.server, ServerSettings::default());
    }

    #[test]
    fn partial_server_section_keeps_defaults() {
        let config =
            Configuration::parse("[database]\npath = \":memory:\"\n[server]\nport = 9000\n")
                .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn missing_database_section_is_an_error() {
        assert!(Configuration::parse("[server]\nport = 1\n").is_err());
    }
}
