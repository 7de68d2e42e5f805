use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_LISTEN_IP: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_NETWORK: &str = "testnet";
pub const DEFAULT_ROSTER_SIZE: usize = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("fleet.roster_size must be at least 1")]
    EmptyRoster,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct ServerConfig {
    pub listen_ip: Option<String>,
    pub port: Option<u16>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct FleetConfig {
    pub default_network: Option<String>,
    pub roster_size: Option<usize>,
}

impl FleetConfig {
    pub fn network(&self) -> &str {
        self.default_network.as_deref().unwrap_or(DEFAULT_NETWORK)
    }

    pub fn roster_size(&self) -> usize {
        self.roster_size.unwrap_or(DEFAULT_ROSTER_SIZE)
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub fleet: FleetConfig,
}

impl AppConfig {
    pub fn parse(raw: &str, path: &str) -> Result<AppConfig, ConfigError> {
        let config: AppConfig = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })?;
        if config.fleet.roster_size == Some(0) {
            return Err(ConfigError::EmptyRoster);
        }
        Ok(config)
    }
}

/// Loads the TOML config at `path`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let shown = path.display().to_string();
    if !path.exists() {
        tracing::warn!(path = %shown, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }
    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: shown.clone(),
        source,
    })?;
    tracing::info!(path = %shown, "loaded config");
    AppConfig::parse(&config_str, &shown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let raw = r#"
            [server]
            listen_ip = "0.0.0.0"
            port = 9000

            [fleet]
            default_network = "mainnet"
            roster_size = 12
        "#;
        let config = AppConfig::parse(raw, "inline").unwrap();
        assert_eq!(config.server.listen_ip.as_deref(), Some("0.0.0.0"));
        assert_eq!(config.server.port, Some(9000));
        assert_eq!(config.fleet.network(), "mainnet");
        assert_eq!(config.fleet.roster_size(), 12);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = AppConfig::parse("", "inline").unwrap();
        assert!(config.server.listen_ip.is_none());
        assert_eq!(config.fleet.network(), DEFAULT_NETWORK);
        assert_eq!(config.fleet.roster_size(), DEFAULT_ROSTER_SIZE);
    }

    #[test]
    fn rejects_zero_roster() {
        let raw = "[fleet]\nroster_size = 0\n";
        assert!(matches!(
            AppConfig::parse(raw, "inline"),
            Err(ConfigError::EmptyRoster)
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            AppConfig::parse("[server\nport = 1", "inline"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let config = load_config(Path::new("definitely/not/here.toml")).unwrap();
        assert_eq!(config.fleet.roster_size(), DEFAULT_ROSTER_SIZE);
    }

    #[test]
    fn loads_file_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "pnode-dashboard-config-{}.toml",
            std::process::id()
        ));
        fs::write(&path, "[server]\nport = 8123\n\n[fleet]\nroster_size = 7\n").unwrap();

        let config = load_config(&path);
        fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.server.port, Some(8123));
        assert_eq!(config.fleet.roster_size(), 7);
        assert_eq!(config.fleet.network(), DEFAULT_NETWORK);
    }
}
