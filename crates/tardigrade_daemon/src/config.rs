use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tardigrade_core::WalkConfig;
use tracing::warn;

/// Returns the ~/.tardigrade directory, creating it if needed.
/// Falls back to a local `.tardigrade` directory if the home directory cannot be determined.
pub fn tardigrade_data_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(mut path) => {
            path.push(".tardigrade");
            if let Err(e) = fs::create_dir_all(&path) {
                warn!(error = %e, "Could not create ~/.tardigrade, falling back to local .tardigrade");
                let fallback = PathBuf::from(".tardigrade");
                let _ = fs::create_dir_all(&fallback);
                return fallback;
            }
            path
        }
        None => {
            warn!("Could not determine home directory, falling back to local .tardigrade");
            let fallback = PathBuf::from(".tardigrade");
            let _ = fs::create_dir_all(&fallback);
            fallback
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub walk: WalkConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    pub port: u16,
    /// Bind on all interfaces instead of loopback
    #[serde(default)]
    pub public: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 3030,
            public: false,
        }
    }
}

impl ApiConfig {
    pub fn bind_addr(&self) -> String {
        if self.public {
            format!("0.0.0.0:{}", self.port)
        } else {
            format!("127.0.0.1:{}", self.port)
        }
    }
}

/// Where transaction records are read from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// JSON file holding an array of transaction records; unset means
    /// `~/.tardigrade/transactions.json`, resolved on first use
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Upper bound on a single full-log read
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,
}

fn default_store_path() -> PathBuf {
    let mut path = tardigrade_data_dir();
    path.push("transactions.json");
    path
}

fn default_read_timeout() -> u64 {
    10
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            read_timeout_secs: default_read_timeout(),
        }
    }
}

impl StoreConfig {
    /// Configured store file, or the default under the data directory.
    pub fn file_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_store_path)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

impl Config {
    pub fn get_config_path() -> PathBuf {
        let mut path = tardigrade_data_dir();
        path.push("config.toml");
        path
    }

    /// Load the config file, writing defaults on first use.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::get_config_path();

        if !path.exists() {
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.walk.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::get_config_path();
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config = Config::from_toml(
            r#"
            [api]
            port = 8080

            [walk]
            batch_size = 25
            "#,
        )
        .unwrap();

        assert_eq!(config.api.port, 8080);
        assert!(!config.api.public);
        assert_eq!(config.walk.batch_size, 25);
        assert_eq!(config.store.read_timeout_secs, 10);
        assert_eq!(config.store.path, None);
    }

    #[test]
    fn defaults_leave_store_path_unresolved() {
        assert_eq!(Config::default().store.path, None);
        assert!(!Config::default().to_toml().unwrap().contains("path"));
    }

    #[test]
    fn explicit_store_path_is_kept() {
        let config = Config::from_toml(
            r#"
            [store]
            path = "/var/lib/tardigrade/log.json"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.store.file_path(),
            PathBuf::from("/var/lib/tardigrade/log.json")
        );
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        assert!(Config::from_toml("[walk]\nbatch_size = 0\n").is_err());
    }

    #[test]
    fn toml_round_trip_keeps_values() {
        let mut config = Config::default();
        config.api.public = true;
        config.store.read_timeout_secs = 3;

        let parsed = Config::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
        assert_eq!(parsed.api.bind_addr(), "0.0.0.0:3030");
    }
}
