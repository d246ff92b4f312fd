use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use serde::Deserialize;

use super::error::{BootstrapError, Result};

/// Bootstrap endpoint as written by the user: `host:port` or `[ipv6]:port`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Host without brackets, e.g. `::1` for `[::1]:8000`.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// The host as an IP literal, if it is one.
    pub fn ip(&self) -> Option<IpAddr> {
        self.host.parse().ok()
    }

    /// Parse and validate a single `host:port` entry. No name resolution happens here.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |reason: &str| {
            BootstrapError::config(format!(
                "invalid url in bootstrap servers: '{}' ({})",
                raw, reason
            ))
        };

        if raw.chars().any(char::is_whitespace) {
            return Err(invalid("whitespace is not allowed"));
        }

        let (host, port_str) = if let Some(rest) = raw.strip_prefix('[') {
            // [ipv6]:port
            let (host, after) = rest
                .split_once(']')
                .ok_or_else(|| invalid("unclosed '['"))?;
            if host.contains('[') || after.contains('[') || after.contains(']') {
                return Err(invalid("malformed brackets"));
            }
            if host.is_empty() {
                return Err(invalid("empty host"));
            }
            if !host.contains(':') || !host.chars().all(is_ipv6_literal_char) {
                return Err(invalid("brackets must enclose an IPv6 literal"));
            }
            let port_str = after
                .strip_prefix(':')
                .ok_or_else(|| invalid("missing port"))?;
            (host, port_str)
        } else {
            if raw.contains('[') || raw.contains(']') {
                return Err(invalid("malformed brackets"));
            }
            let (host, port_str) = raw.rsplit_once(':').ok_or_else(|| invalid("missing port"))?;
            if host.contains(':') {
                return Err(invalid("IPv6 literal must be enclosed in brackets"));
            }
            if host.is_empty() {
                return Err(invalid("empty host"));
            }
            if !host.chars().all(is_hostname_char) {
                return Err(invalid("illegal character in host"));
            }
            (host, port_str)
        };

        let port = parse_port(port_str).map_err(|reason| invalid(reason))?;
        Ok(Self::new(host, port))
    }
}

fn is_hostname_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_')
}

fn is_ipv6_literal_char(c: char) -> bool {
    // hex digits, separators, embedded IPv4 and a zone id after '%'
    c.is_ascii_alphanumeric() || matches!(c, ':' | '.' | '%' | '-' | '_')
}

fn parse_port(s: &str) -> std::result::Result<u16, &'static str> {
    if s.is_empty() {
        return Err("missing port");
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err("port is not a number");
    }
    // Anything that overflows u32 is out of range as well.
    let port: u32 = s.parse().map_err(|_| "port out of range")?;
    u16::try_from(port).map_err(|_| "port out of range")
}

impl FromStr for Endpoint {
    type Err = BootstrapError;

    fn from_str(s: &str) -> Result<Self> {
        Endpoint::parse(s)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl<'de> Deserialize<'de> for Endpoint {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Endpoint::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A bootstrap endpoint after resolution, ready for the connection layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedAddress {
    hostname: String,
    ip: IpAddr,
    port: u16,
}

impl ResolvedAddress {
    pub fn new(hostname: impl Into<String>, ip: IpAddr, port: u16) -> Self {
        Self {
            hostname: hostname.into(),
            ip,
            port,
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }
}

impl From<&ResolvedAddress> for SocketAddr {
    fn from(addr: &ResolvedAddress) -> Self {
        addr.socket_addr()
    }
}

impl fmt::Display for ResolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.hostname, self.socket_addr())
    }
}

/// Split a comma-separated `bootstrap.servers` value. Entries are not trimmed.
pub fn split_bootstrap_servers(list: &str) -> Vec<String> {
    if list.is_empty() {
        return Vec::new();
    }
    list.split(',').map(str::to_string).collect()
}
