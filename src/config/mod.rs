pub mod types;

use anyhow::{Context, Result};

use crate::bootstrap::Bootstrap;
use crate::dns::{build_resolver, HostResolver};

pub use types::{Config, DnsConfig, LogConfig};

pub fn load_config(path: &str) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path))?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = serde_yml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Build the resolver stack from `dns` and bind it to `client_dns_lookup`.
    pub fn bootstrap(&self) -> Result<Bootstrap<Box<dyn HostResolver>>> {
        let resolver = build_resolver(&self.dns)?;
        Ok(Bootstrap::with_resolver(resolver, self.client_dns_lookup))
    }
}
