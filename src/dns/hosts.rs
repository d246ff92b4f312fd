use std::collections::HashMap;
use std::net::IpAddr;

use tracing::debug;

use crate::common::error::{BootstrapError, Result};

use super::HostResolver;

/// 静态域名映射表，未知域名返回 `HostNotFound`
///
/// 同一地址的第一个域名作为其规范名。
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    hosts: HashMap<String, Vec<IpAddr>>,
    canonical: Vec<(IpAddr, String)>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// 为 `host` 追加地址（域名不区分大小写）
    pub fn with_host(mut self, host: &str, addrs: impl IntoIterator<Item = IpAddr>) -> Self {
        self.insert(host, addrs);
        self
    }

    pub fn insert(&mut self, host: &str, addrs: impl IntoIterator<Item = IpAddr>) {
        let host = host.to_lowercase();
        let entry = self.hosts.entry(host.clone()).or_default();
        for ip in addrs {
            if !self.canonical.iter().any(|(known, _)| *known == ip) {
                self.canonical.push((ip, host.clone()));
            }
            entry.push(ip);
        }
    }

    pub fn lookup(&self, host: &str) -> Option<&[IpAddr]> {
        self.hosts.get(&host.to_lowercase()).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// 解析 hosts 文件格式：`ip name [alias...]`，`#` 开始注释
    pub fn parse_hosts_file(content: &str) -> Self {
        let mut table = Self::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 2 {
                continue;
            }
            let ip: IpAddr = match parts[0].parse() {
                Ok(ip) => ip,
                Err(_) => continue,
            };
            for &hostname in &parts[1..] {
                if hostname.starts_with('#') {
                    break;
                }
                table.insert(hostname, [ip]);
            }
        }
        table
    }
}

impl From<HashMap<String, Vec<IpAddr>>> for StaticResolver {
    fn from(hosts: HashMap<String, Vec<IpAddr>>) -> Self {
        let mut names: Vec<_> = hosts.into_iter().collect();
        // 按域名排序，保证规范名稳定
        names.sort_by(|a, b| a.0.cmp(&b.0));
        let mut table = Self::new();
        for (host, addrs) in names {
            table.insert(&host, addrs);
        }
        table
    }
}

impl HostResolver for StaticResolver {
    fn resolve(&self, host: &str) -> Result<Vec<IpAddr>> {
        match self.lookup(host) {
            Some(addrs) if !addrs.is_empty() => Ok(addrs.to_vec()),
            _ => Err(BootstrapError::host_not_found(host)),
        }
    }

    fn canonical_name(&self, ip: IpAddr) -> Option<String> {
        self.canonical
            .iter()
            .find(|(known, _)| *known == ip)
            .map(|(_, name)| name.clone())
    }
}

/// HOSTS 静态域名映射解析器，优先查表，未命中再交给内层解析器
pub struct HostsResolver {
    inner: Box<dyn HostResolver>,
    hosts: StaticResolver,
}

impl HostsResolver {
    pub fn new(inner: Box<dyn HostResolver>, hosts: impl Into<StaticResolver>) -> Self {
        Self {
            inner,
            hosts: hosts.into(),
        }
    }
}

impl HostResolver for HostsResolver {
    fn resolve(&self, host: &str) -> Result<Vec<IpAddr>> {
        if let Some(addrs) = self.hosts.lookup(host).filter(|a| !a.is_empty()) {
            debug!(host = host, count = addrs.len(), "hosts file hit");
            return Ok(addrs.to_vec());
        }
        self.inner.resolve(host)
    }

    fn canonical_name(&self, ip: IpAddr) -> Option<String> {
        self.hosts
            .canonical_name(ip)
            .or_else(|| self.inner.canonical_name(ip))
    }
}
