use std::path::PathBuf;

use eyre::OptionExt;
use serde::{Deserialize, Serialize};
use tokio::fs;
use url::Url;

/// Persisted CLI state: backend address and the session token from the
/// last login.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api_url: Option<Url>,
    #[serde(default)]
    pub token: Option<String>,
}

impl Config {
    pub async fn load() -> eyre::Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).await?;

        let config = toml::from_str(&contents)?;

        Ok(config)
    }

    pub async fn save(&self) -> eyre::Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let contents = toml::to_string_pretty(self)?;

        fs::write(path, contents).await?;

        Ok(())
    }

    fn config_path() -> eyre::Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_eyre("could not find config directory")?;

        Ok(config_dir.join("mensactl/config.toml"))
    }
}
