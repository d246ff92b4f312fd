pub mod family;
pub mod hosts;
pub mod lookup;
pub mod resolver;
pub mod rotating;

use std::net::IpAddr;

use crate::common::error::Result;

pub use family::{filter_preferred_addresses, AddressFamily};
pub use hosts::{HostsResolver, StaticResolver};
pub use lookup::DnsLookupStrategy;
pub use resolver::{build_resolver, HickoryResolver, SystemResolver};
pub use rotating::AddressChangeResolver;

/// DNS 解析器 trait
///
/// 实现会阻塞调用线程直到底层解析完成，不额外叠加超时。
pub trait HostResolver: Send + Sync {
    /// 解析域名，按后端返回的顺序给出地址
    ///
    /// 域名不存在时返回 [`BootstrapError::HostNotFound`](crate::common::error::BootstrapError::HostNotFound)。
    fn resolve(&self, host: &str) -> Result<Vec<IpAddr>>;

    /// 反查 `ip` 的规范名，后端不支持时返回 `None`
    fn canonical_name(&self, _ip: IpAddr) -> Option<String> {
        None
    }
}

impl<R: HostResolver + ?Sized> HostResolver for &R {
    fn resolve(&self, host: &str) -> Result<Vec<IpAddr>> {
        (**self).resolve(host)
    }

    fn canonical_name(&self, ip: IpAddr) -> Option<String> {
        (**self).canonical_name(ip)
    }
}

impl<R: HostResolver + ?Sized> HostResolver for Box<R> {
    fn resolve(&self, host: &str) -> Result<Vec<IpAddr>> {
        (**self).resolve(host)
    }

    fn canonical_name(&self, ip: IpAddr) -> Option<String> {
        (**self).canonical_name(ip)
    }
}

impl<R: HostResolver + ?Sized> HostResolver for std::sync::Arc<R> {
    fn resolve(&self, host: &str) -> Result<Vec<IpAddr>> {
        (**self).resolve(host)
    }

    fn canonical_name(&self, ip: IpAddr) -> Option<String> {
        (**self).canonical_name(ip)
    }
}
