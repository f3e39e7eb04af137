use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing_subscriber::EnvFilter;

use crate::api::HttpRecipeStore;
use crate::config::Config;

/// Where to find the recipe service
#[derive(Args, Debug, Clone)]
pub struct Connection {
    /// YAML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Base URL of the recipe service, overriding the configuration
    #[arg(long)]
    pub server: Option<String>,
}

impl Connection {
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::resolve(self.config.as_deref())?;
        if let Some(server) = &self.server {
            config.server.base_url = server.clone();
        }
        Ok(config)
    }

    pub fn store(&self) -> Result<HttpRecipeStore> {
        HttpRecipeStore::new(&self.config()?)
    }
}

/// Log to stderr, filtered by `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
