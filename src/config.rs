use std::{net::SocketAddr, path::PathBuf};

use serde::Deserialize;

/// Where the store looks for its configuration.
pub const CONFIG_PATH: &str = "./data/config.toml";

/// Describing the store configuration.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the store listens on.
    #[serde(default = "Config::default_addr")]
    pub addr: SocketAddr,
    /// JSON snapshot file. Data stays in memory if unset.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    /// Buildings seeded into an empty store.
    #[serde(default)]
    pub buildings: Vec<BuildingSeed>,
}

/// Describing a building to seed.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BuildingSeed {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Config {
    fn default_addr() -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 3001))
    }

    /// Reads the config at `path`, falling back to the default if the file
    /// does not exist.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("config {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: Self::default_addr(),
            data_file: None,
            buildings: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_buildings() {
        let config: Config = toml::from_str(
            r#"
            addr = "0.0.0.0:8080"

            [[buildings]]
            name = "Hanul Hall"
            type = "male"
            "#,
        )
        .unwrap();

        assert_eq!(config.addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(config.data_file, None);
        assert_eq!(
            config.buildings,
            [BuildingSeed {
                name: "Hanul Hall".to_string(),
                kind: "male".to_string(),
            }]
        );
    }

    #[test]
    fn missing_file_uses_defaults() {
        let config = Config::load("./data/does-not-exist.toml").unwrap();
        assert_eq!(config, Config::default());
    }
}
