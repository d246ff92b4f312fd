use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use dns_lookup::{LookupError, LookupErrorKind};

use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::Resolver;
use tracing::{debug, info};

use crate::common::error::{BootstrapError, Result};
use crate::config::types::DnsConfig;

use super::hosts::HostsResolver;
use super::HostResolver;

/// 系统解析器（`getaddrinfo` / `getnameinfo`）
///
/// 超时与重试沿用系统解析器配置。
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl HostResolver for SystemResolver {
    fn resolve(&self, host: &str) -> Result<Vec<IpAddr>> {
        let resolved = dns_lookup::getaddrinfo(Some(host), None, None)
            .map_err(|e| classify_lookup_error(host, e))?;
        let addrs = dedup_in_order(
            resolved
                .filter_map(std::result::Result::ok)
                .map(|info| info.sockaddr.ip()),
        );
        if addrs.is_empty() {
            return Err(BootstrapError::host_not_found(host));
        }
        debug!(host = host, count = addrs.len(), "system DNS resolved");
        Ok(addrs)
    }

    fn canonical_name(&self, ip: IpAddr) -> Option<String> {
        match dns_lookup::lookup_addr(&ip) {
            Ok(name) => Some(name),
            Err(e) => {
                debug!(ip = %ip, error = %e, "system reverse lookup failed");
                None
            }
        }
    }
}

/// NXDOMAIN / 无记录 -> `HostNotFound`，其余（如 `EAI_AGAIN`）-> `Dns`
fn classify_lookup_error(host: &str, e: LookupError) -> BootstrapError {
    debug!(host = host, error = ?e, "system DNS lookup failed");
    match e.kind() {
        LookupErrorKind::NoName | LookupErrorKind::NoData => BootstrapError::host_not_found(host),
        kind => BootstrapError::Dns {
            host: host.to_string(),
            reason: format!("getaddrinfo failed: {:?}", kind),
        },
    }
}

/// 基于 hickory-resolver 的解析器，可指定上游 DNS 服务器，并通过 PTR 查询提供规范名
pub struct HickoryResolver {
    resolver: Resolver,
}

impl HickoryResolver {
    /// 使用系统配置中的 DNS 服务器（`/etc/resolv.conf`）
    pub fn from_system_conf(timeout: Option<Duration>) -> Result<Self> {
        let (config, mut opts) =
            hickory_resolver::system_conf::read_system_conf().map_err(|e| BootstrapError::Dns {
                host: "system-conf".to_string(),
                reason: e.to_string(),
            })?;
        if let Some(timeout) = timeout {
            opts.timeout = timeout;
        }
        Self::with_config(config, opts)
    }

    /// 使用指定的 DNS 服务器，格式为 `ip`、`ip:port` 或 `[ipv6]:port`
    pub fn new(nameservers: &[String], timeout: Option<Duration>) -> Result<Self> {
        if nameservers.is_empty() {
            return Err(BootstrapError::config("at least one nameserver is required"));
        }
        let mut group = NameServerConfigGroup::new();
        for address in nameservers {
            let (ip, port) = parse_ip_port(address, 53)?;
            group.merge(NameServerConfigGroup::from_ips_clear(&[ip], port, true));
        }
        let config = ResolverConfig::from_parts(None, vec![], group);

        let mut opts = ResolverOpts::default();
        opts.use_hosts_file = false;
        if let Some(timeout) = timeout {
            opts.timeout = timeout;
        }
        info!(nameservers = ?nameservers, "hickory DNS resolver created");
        Self::with_config(config, opts)
    }

    fn with_config(config: ResolverConfig, opts: ResolverOpts) -> Result<Self> {
        let resolver = Resolver::new(config, opts)?;
        Ok(Self { resolver })
    }
}

impl HostResolver for HickoryResolver {
    fn resolve(&self, host: &str) -> Result<Vec<IpAddr>> {
        let response = self
            .resolver
            .lookup_ip(host)
            .map_err(|e| classify_resolve_error(host, e))?;
        let addrs = dedup_in_order(response.iter());
        if addrs.is_empty() {
            return Err(BootstrapError::host_not_found(host));
        }
        debug!(host = host, count = addrs.len(), "hickory DNS resolved");
        Ok(addrs)
    }

    fn canonical_name(&self, ip: IpAddr) -> Option<String> {
        let lookup = match self.resolver.reverse_lookup(ip) {
            Ok(lookup) => lookup,
            Err(e) => {
                debug!(ip = %ip, error = %e, "reverse lookup failed");
                return None;
            }
        };
        let name = lookup.iter().next()?.to_string();
        Some(name.trim_end_matches('.').to_string())
    }
}

fn classify_resolve_error(host: &str, e: ResolveError) -> BootstrapError {
    match e.kind() {
        ResolveErrorKind::NoRecordsFound { .. } => BootstrapError::host_not_found(host),
        _ => BootstrapError::Dns {
            host: host.to_string(),
            reason: e.to_string(),
        },
    }
}

fn dedup_in_order(addrs: impl Iterator<Item = IpAddr>) -> Vec<IpAddr> {
    let mut out: Vec<IpAddr> = Vec::new();
    for ip in addrs {
        if !out.contains(&ip) {
            out.push(ip);
        }
    }
    out
}

/// 根据配置构建解析器：上游 DNS（或系统解析器），前置静态 hosts 映射
pub fn build_resolver(config: &DnsConfig) -> Result<Box<dyn HostResolver>> {
    let timeout = config.timeout_secs.map(Duration::from_secs);
    let inner: Box<dyn HostResolver> = if !config.servers.is_empty() {
        Box::new(HickoryResolver::new(&config.servers, timeout)?)
    } else if timeout.is_some() {
        info!("DNS timeout configured, using hickory with system nameservers");
        Box::new(HickoryResolver::from_system_conf(timeout)?)
    } else {
        info!("no DNS servers configured, using system resolver");
        Box::new(SystemResolver)
    };

    if config.hosts.is_empty() {
        return Ok(inner);
    }

    let mut hosts_map = std::collections::HashMap::new();
    for (hostname, ips) in &config.hosts {
        for ip_str in ips {
            let ip: IpAddr = ip_str.parse().map_err(|_| {
                BootstrapError::config(format!("invalid IP '{}' for host '{}'", ip_str, hostname))
            })?;
            hosts_map
                .entry(hostname.to_lowercase())
                .or_insert_with(Vec::new)
                .push(ip);
        }
    }
    info!(count = hosts_map.len(), "DNS hosts mappings loaded");
    Ok(Box::new(HostsResolver::new(inner, hosts_map)))
}

/// 解析 `ip`、`ip:port`、`[ipv6]` 或 `[ipv6]:port`
pub fn parse_ip_port(s: &str, default_port: u16) -> Result<(IpAddr, u16)> {
    if let Ok(ip) = s.parse::<IpAddr>() {
        return Ok((ip, default_port));
    }
    if let Ok(addr) = s.parse::<SocketAddr>() {
        return Ok((addr.ip(), addr.port()));
    }
    if let Some(stripped) = s.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        if let Ok(ip) = stripped.parse::<Ipv6Addr>() {
            return Ok((IpAddr::V6(ip), default_port));
        }
    }
    Err(BootstrapError::config(format!("invalid DNS address: {}", s)))
}
