use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::common::error::{BootstrapError, Result};

use super::HostResolver;

/// 每次调用返回不同结果的解析器，用于测试重新解析
///
/// 第 n 次调用返回第 n 组地址，用完后一直返回最后一组；
/// 所有域名得到相同的结果，空地址组视为 `HostNotFound`。
#[derive(Debug)]
pub struct AddressChangeResolver {
    answers: Vec<Vec<IpAddr>>,
    canonical_names: HashMap<IpAddr, String>,
    calls: AtomicUsize,
}

impl AddressChangeResolver {
    /// 第一次返回 `initial`，之后返回 `changed`
    pub fn new(initial: Vec<IpAddr>, changed: Vec<IpAddr>) -> Self {
        Self {
            answers: vec![initial, changed],
            canonical_names: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn from_answer_sets(answers: Vec<Vec<IpAddr>>) -> Result<Self> {
        if answers.is_empty() {
            return Err(BootstrapError::IllegalArgument(
                "at least one answer set is required".to_string(),
            ));
        }
        Ok(Self {
            answers,
            canonical_names: HashMap::new(),
            calls: AtomicUsize::new(0),
        })
    }

    /// 设置 `ip` 的规范名
    pub fn with_canonical_name(mut self, ip: IpAddr, name: impl Into<String>) -> Self {
        self.canonical_names.insert(ip, name.into());
        self
    }

    /// 已发生的 `resolve` 调用次数
    pub fn resolution_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HostResolver for AddressChangeResolver {
    fn resolve(&self, host: &str) -> Result<Vec<IpAddr>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let idx = call.min(self.answers.len() - 1);
        let answer = &self.answers[idx];
        if answer.is_empty() {
            return Err(BootstrapError::host_not_found(host));
        }
        Ok(answer.clone())
    }

    fn canonical_name(&self, ip: IpAddr) -> Option<String> {
        self.canonical_names.get(&ip).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::ErrorKind;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn successive_calls_rotate() {
        let a = vec![ip("198.51.100.0"), ip("198.51.100.5")];
        let b = vec![ip("203.0.113.1")];
        let resolver = AddressChangeResolver::new(a.clone(), b.clone());

        assert_eq!(resolver.resolve("kafka.apache.org").unwrap(), a);
        assert_eq!(resolver.resolve("kafka.apache.org").unwrap(), b);
        // 之后一直返回最后一组
        assert_eq!(resolver.resolve("kafka.apache.org").unwrap(), b);
        assert_eq!(resolver.resolution_count(), 3);
    }

    #[test]
    fn more_than_two_sets() {
        let sets = vec![vec![ip("10.0.0.1")], vec![ip("10.0.0.2")], vec![ip("10.0.0.3")]];
        let resolver = AddressChangeResolver::from_answer_sets(sets).unwrap();
        for expected in ["10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.0.3"] {
            assert_eq!(resolver.resolve("h").unwrap(), vec![ip(expected)]);
        }
    }

    #[test]
    fn empty_set_is_host_not_found() {
        let resolver = AddressChangeResolver::new(vec![], vec![ip("10.0.0.1")]);
        assert_eq!(
            resolver.resolve("h").unwrap_err().kind(),
            ErrorKind::HostNotFound
        );
        assert_eq!(resolver.resolve("h").unwrap(), vec![ip("10.0.0.1")]);
    }

    #[test]
    fn no_answer_sets_rejected() {
        let err = AddressChangeResolver::from_answer_sets(vec![]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalArgument);
    }

    #[test]
    fn canonical_names() {
        let resolver = AddressChangeResolver::new(vec![ip("10.0.0.1")], vec![])
            .with_canonical_name(ip("10.0.0.1"), "b-1.cluster.internal");
        assert_eq!(
            resolver.canonical_name(ip("10.0.0.1")).as_deref(),
            Some("b-1.cluster.internal")
        );
        assert_eq!(resolver.canonical_name(ip("10.0.0.2")), None);
    }
}
