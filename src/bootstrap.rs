//! Turns a `bootstrap.servers` list into the addresses the connection layer dials.
//!
//! Every entry is parsed before any DNS query is made, so one malformed entry
//! fails the whole call without touching the network. Hosts that do not
//! resolve are skipped as long as at least one entry yields an address.

use std::net::IpAddr;

use tracing::{debug, warn};

use crate::common::addr::{Endpoint, ResolvedAddress};
use crate::common::error::{BootstrapError, Result};
use crate::dns::{filter_preferred_addresses, DnsLookupStrategy, HostResolver, SystemResolver};

/// A bootstrap entry that parsed fine but could not be resolved.
#[derive(Debug)]
pub struct UnresolvedEndpoint {
    pub endpoint: Endpoint,
    pub error: BootstrapError,
}

/// Outcome of a successful bootstrap resolution.
#[derive(Debug, Default)]
pub struct BootstrapAddresses {
    /// In input order, then resolver order within each host.
    pub addresses: Vec<ResolvedAddress>,
    /// Entries skipped because their host was not found.
    pub unresolved: Vec<UnresolvedEndpoint>,
}

/// Bootstrap address builder bound to a resolver and a lookup strategy.
#[derive(Debug, Clone)]
pub struct Bootstrap<R = SystemResolver> {
    resolver: R,
    strategy: DnsLookupStrategy,
}

impl Bootstrap<SystemResolver> {
    pub fn new(strategy: DnsLookupStrategy) -> Self {
        Self::with_resolver(SystemResolver, strategy)
    }
}

impl<R: HostResolver> Bootstrap<R> {
    pub fn with_resolver(resolver: R, strategy: DnsLookupStrategy) -> Self {
        Self { resolver, strategy }
    }

    pub fn strategy(&self) -> DnsLookupStrategy {
        self.strategy
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Resolve `raw` and return only the addresses.
    pub fn resolve_addresses<S: AsRef<str>>(&self, raw: &[S]) -> Result<Vec<ResolvedAddress>> {
        Ok(self.resolve_report(raw)?.addresses)
    }

    /// Resolve `raw`, also reporting the entries that were skipped.
    pub fn resolve_report<S: AsRef<str>>(&self, raw: &[S]) -> Result<BootstrapAddresses> {
        let endpoints = raw
            .iter()
            .map(|entry| Endpoint::parse(entry.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut report = BootstrapAddresses::default();
        for endpoint in endpoints {
            match self.expand(&endpoint) {
                Ok(resolved) => {
                    debug!(
                        endpoint = %endpoint,
                        count = resolved.len(),
                        strategy = %self.strategy,
                        "bootstrap endpoint resolved"
                    );
                    report.addresses.extend(resolved);
                }
                Err(error @ BootstrapError::HostNotFound { .. }) => {
                    warn!(
                        endpoint = %endpoint,
                        error = %error,
                        "couldn't resolve bootstrap server, DNS resolution failed"
                    );
                    report.unresolved.push(UnresolvedEndpoint { endpoint, error });
                }
                Err(e) => return Err(e),
            }
        }

        if report.addresses.is_empty() {
            return Err(BootstrapError::config(
                "no resolvable bootstrap urls given in bootstrap servers",
            ));
        }
        Ok(report)
    }

    fn expand(&self, endpoint: &Endpoint) -> Result<Vec<ResolvedAddress>> {
        let port = endpoint.port();
        let ips = match endpoint.ip() {
            Some(ip) => vec![ip],
            None => self.resolver.resolve(endpoint.host())?,
        };
        if ips.is_empty() {
            return Err(BootstrapError::host_not_found(endpoint.host()));
        }

        let resolved = match self.strategy {
            DnsLookupStrategy::UseAllDnsIps => ips
                .into_iter()
                .map(|ip| ResolvedAddress::new(endpoint.host(), ip, port))
                .collect(),
            DnsLookupStrategy::ResolveCanonicalBootstrapServersOnly => {
                filter_preferred_addresses(&ips)
                    .into_iter()
                    .map(|ip| {
                        let hostname = self
                            .resolver
                            .canonical_name(ip)
                            .unwrap_or_else(|| ip.to_string());
                        ResolvedAddress::new(hostname, ip, port)
                    })
                    .collect()
            }
        };
        Ok(resolved)
    }
}

/// Resolve `raw` bootstrap entries with the platform resolver.
///
/// `strategy_name` is a `client.dns.lookup` token; an unknown one is an
/// [`BootstrapError::IllegalArgument`].
pub fn parse_and_validate_addresses<S: AsRef<str>>(
    raw: &[S],
    strategy_name: &str,
) -> Result<Vec<ResolvedAddress>> {
    parse_and_validate_addresses_with(raw, strategy_name, &SystemResolver)
}

/// Same as [`parse_and_validate_addresses`] with a caller supplied resolver.
pub fn parse_and_validate_addresses_with<S, R>(
    raw: &[S],
    strategy_name: &str,
    resolver: &R,
) -> Result<Vec<ResolvedAddress>>
where
    S: AsRef<str>,
    R: HostResolver + ?Sized,
{
    let strategy = DnsLookupStrategy::for_config(strategy_name)?;
    Bootstrap::with_resolver(resolver, strategy).resolve_addresses(raw)
}

/// Resolve `host` and keep only the addresses of the preferred family.
///
/// Nothing is cached, so calling this again observes DNS changes.
pub fn resolve<R: HostResolver + ?Sized>(host: &str, resolver: &R) -> Result<Vec<IpAddr>> {
    let addresses = resolver.resolve(host)?;
    let preferred = filter_preferred_addresses(&addresses);
    debug!(host = host, addresses = ?preferred, "resolved host");
    Ok(preferred)
}
