use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub http: HttpConfig,
}

impl Config {
    /// Load the configuration from a YAML file.
    pub fn load(yml_path: &Path) -> anyhow::Result<Self> {
        let yml = std::fs::read_to_string(yml_path)
            .with_context(|| format!("Reading config file {}", yml_path.display()))?;
        let config = serde_yaml::from_str(&yml)
            .with_context(|| format!("Parsing config file {}", yml_path.display()))?;
        Ok(config)
    }

    /// Load the file if one is given, then let the environment (and `.env`) override it.
    pub fn resolve(yml_path: Option<&Path>) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let mut config = match yml_path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| dotenvy::var(key).ok());
        Ok(config)
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("BITEWISE_API_URL") {
            self.server.base_url = url;
        }
        if let Some(path) = var("BITEWISE_TOKEN_PATH") {
            self.session.token_path = PathBuf::from(path);
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".into(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Where the bearer token is kept between runs
    pub token_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_path: PathBuf::from(".bitewise-token"),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Extra attempts for reads that failed transiently
    pub retries: usize,
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            retries: 3,
            timeout_secs: 120,
        }
    }
}
