use std::net::IpAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    pub fn of(ip: &IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => AddressFamily::V4,
            IpAddr::V6(_) => AddressFamily::V6,
        }
    }
}

/// 只保留与第一个地址同一地址族的地址，保持原有顺序
///
/// 输入为空时返回空结果。
pub fn filter_preferred_addresses(addresses: &[IpAddr]) -> Vec<IpAddr> {
    let Some(first) = addresses.first() else {
        return Vec::new();
    };
    let family = AddressFamily::of(first);
    addresses
        .iter()
        .filter(|ip| AddressFamily::of(ip) == family)
        .copied()
        .collect()
}
