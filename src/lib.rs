//! Bootstrap server resolution for cluster clients.
//!
//! Parses `host:port` bootstrap entries, resolves them through a pluggable
//! [`HostResolver`](dns::HostResolver) under a [`DnsLookupStrategy`](dns::DnsLookupStrategy)
//! and hands back ordered socket endpoints for the connection layer.
//!
//! ```no_run
//! use bootstrap_resolver::bootstrap::parse_and_validate_addresses;
//!
//! let addrs = parse_and_validate_addresses(
//!     &["broker-1.example.com:9092", "[::1]:9092"],
//!     "use_all_dns_ips",
//! )?;
//! for addr in &addrs {
//!     println!("{}", addr);
//! }
//! # Ok::<(), bootstrap_resolver::common::error::BootstrapError>(())
//! ```

pub mod bootstrap;
pub mod common;
pub mod config;
pub mod dns;

pub use bootstrap::{parse_and_validate_addresses, resolve, Bootstrap, BootstrapAddresses};
pub use common::addr::{Endpoint, ResolvedAddress};
pub use common::error::{BootstrapError, ErrorKind};
pub use dns::{DnsLookupStrategy, HostResolver};
