use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::common::error::BootstrapError;

/// bootstrap 域名展开为地址的方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DnsLookupStrategy {
    /// 每个解析出的 IP 一个端点，保留配置中的域名
    #[default]
    UseAllDnsIps,
    /// 解析后只保留一个地址族，并以规范名标记每个 IP
    ResolveCanonicalBootstrapServersOnly,
}

impl DnsLookupStrategy {
    pub const ALL: [DnsLookupStrategy; 2] = [
        DnsLookupStrategy::UseAllDnsIps,
        DnsLookupStrategy::ResolveCanonicalBootstrapServersOnly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DnsLookupStrategy::UseAllDnsIps => "use_all_dns_ips",
            DnsLookupStrategy::ResolveCanonicalBootstrapServersOnly => {
                "resolve_canonical_bootstrap_servers_only"
            }
        }
    }

    /// 按配置值查找策略（ASCII 不区分大小写）
    pub fn for_config(name: &str) -> Result<Self, BootstrapError> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                BootstrapError::IllegalArgument(format!(
                    "no DNS lookup strategy named '{}', expected one of: {}, {}",
                    name,
                    DnsLookupStrategy::UseAllDnsIps,
                    DnsLookupStrategy::ResolveCanonicalBootstrapServersOnly
                ))
            })
    }
}

impl FromStr for DnsLookupStrategy {
    type Err = BootstrapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::for_config(s)
    }
}

impl fmt::Display for DnsLookupStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DnsLookupStrategy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::for_config(&s).map_err(serde::de::Error::custom)
    }
}
