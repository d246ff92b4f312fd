use std::collections::HashMap;

use anyhow::Result;
use serde::{Deserialize, Deserializer};

use crate::common::addr::{split_bootstrap_servers, Endpoint};
use crate::dns::resolver::parse_ip_port;
use crate::dns::DnsLookupStrategy;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// `host:port` entries, as a YAML list or a single comma-separated string.
    #[serde(deserialize_with = "deserialize_server_list")]
    pub bootstrap_servers: Vec<String>,
    #[serde(default)]
    pub client_dns_lookup: DnsLookupStrategy,
    #[serde(default)]
    pub dns: DnsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    pub fn new(bootstrap_servers: Vec<String>, client_dns_lookup: DnsLookupStrategy) -> Self {
        Self {
            bootstrap_servers,
            client_dns_lookup,
            dns: DnsConfig::default(),
            log: LogConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.bootstrap_servers.is_empty() {
            anyhow::bail!("at least one bootstrap server is required");
        }
        for entry in &self.bootstrap_servers {
            Endpoint::parse(entry)?;
        }
        for server in &self.dns.servers {
            parse_ip_port(server, 53)?;
        }
        for (hostname, ips) in &self.dns.hosts {
            if ips.is_empty() {
                anyhow::bail!("static host '{}' has no addresses", hostname);
            }
            for ip in ips {
                if ip.parse::<std::net::IpAddr>().is_err() {
                    anyhow::bail!("invalid IP '{}' for static host '{}'", ip, hostname);
                }
            }
        }
        if self.dns.timeout_secs == Some(0) {
            anyhow::bail!("dns timeout_secs must be greater than zero");
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DnsConfig {
    /// Nameservers as `ip`, `ip:port` or `[ipv6]:port`; empty means the platform resolver.
    #[serde(default)]
    pub servers: Vec<String>,
    /// Static host entries answered before any nameserver is asked.
    #[serde(default)]
    pub hosts: HashMap<String, Vec<String>>,
    /// Per-query timeout for the hickory resolver.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ServerList {
    List(Vec<String>),
    Comma(String),
}

fn deserialize_server_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ServerList::deserialize(deserializer)? {
        ServerList::List(list) => list,
        ServerList::Comma(s) => split_bootstrap_servers(&s),
    })
}
