//! End-to-end bootstrap resolution through the public API.

use std::net::IpAddr;

use bootstrap_resolver::bootstrap::{parse_and_validate_addresses_with, resolve};
use bootstrap_resolver::dns::{
    filter_preferred_addresses, AddressChangeResolver, DnsLookupStrategy, HostResolver,
    StaticResolver, SystemResolver,
};
use bootstrap_resolver::{
    parse_and_validate_addresses, Bootstrap, Endpoint, ErrorKind, ResolvedAddress,
};

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

fn check_without_lookup(urls: &[&str]) -> Vec<ResolvedAddress> {
    parse_and_validate_addresses(urls, "use_all_dns_ips").unwrap()
}

#[test]
fn parse_and_validate_literal_and_local_addresses() {
    check_without_lookup(&["127.0.0.1:8000"]);
    check_without_lookup(&["localhost:8080"]);
    check_without_lookup(&["[::1]:8000"]);
    check_without_lookup(&["[2001:db8:85a3:8d3:1319:8a2e:370:7348]:1234", "localhost:10000"]);

    // one endpoint per address the platform gives for localhost
    // (exactly one unless /etc/hosts also maps ::1)
    let expected = SystemResolver.resolve("localhost").unwrap();
    let addrs = check_without_lookup(&["localhost:10000"]);
    assert_eq!(addrs.len(), expected.len());
    for (addr, ip) in addrs.iter().zip(&expected) {
        assert_eq!(addr.hostname(), "localhost");
        assert_eq!(addr.port(), 10000);
        assert_eq!(addr.ip(), *ip);
    }
}

#[test]
fn canonical_lookup_through_system_resolver() {
    let addrs = parse_and_validate_addresses(
        &["localhost:9092"],
        "resolve_canonical_bootstrap_servers_only",
    )
    .unwrap();
    assert!(!addrs.is_empty());
    for addr in &addrs {
        let expected = SystemResolver
            .canonical_name(addr.ip())
            .unwrap_or_else(|| addr.ip().to_string());
        assert_eq!(addr.hostname(), expected);
        assert_eq!(addr.port(), 9092);
    }
}

#[test]
fn single_address_localhost() {
    let resolver = StaticResolver::new().with_host("localhost", [ip("127.0.0.1")]);
    let addrs =
        parse_and_validate_addresses_with(&["localhost:10000"], "use_all_dns_ips", &resolver)
            .unwrap();
    assert_eq!(addrs.len(), 1);
    assert_eq!(addrs[0].hostname(), "localhost");
    assert_eq!(addrs[0].port(), 10000);
}

#[test]
fn canonical_lookup_keeps_single_family() {
    let resolver = StaticResolver::new()
        .with_host(
            "example.com",
            [ip("23.215.0.136"), ip("2600:1406:3a00:21::173e:2e66"), ip("96.7.128.175")],
        )
        .with_host("a23-215-0-136.deploy.example", [ip("23.215.0.136")]);
    let addrs = parse_and_validate_addresses_with(
        &["example.com:10000"],
        "resolve_canonical_bootstrap_servers_only",
        &resolver,
    )
    .unwrap();

    assert_eq!(addrs.len(), 2);
    assert!(addrs.iter().all(|a| a.ip().is_ipv4() && a.port() == 10000));
    // canonical name is the first host registered for the address
    assert_eq!(addrs[0].hostname(), "example.com");
    assert_eq!(addrs[1].hostname(), "example.com");
}

#[test]
fn invalid_strategy() {
    let err = parse_and_validate_addresses(&["localhost:10000"], "random.value").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalArgument);
}

#[test]
fn no_port() {
    let err = parse_and_validate_addresses(&["127.0.0.1"], "use_all_dns_ips").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn invalid_port() {
    let err = parse_and_validate_addresses(&["localhost:70000"], "use_all_dns_ips").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn only_bad_hostname() {
    // syntactically fine, only resolution fails
    assert!(Endpoint::parse("some.invalid.hostname.foo.bar.local:9999").is_ok());
    let err = parse_and_validate_addresses_with(
        &["some.invalid.hostname.foo.bar.local:9999"],
        "use_all_dns_ips",
        &StaticResolver::new(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);

    // Dns instead of Config when no nameserver is reachable
    let err = parse_and_validate_addresses(
        &["some.invalid.hostname.foo.bar.local:9999"],
        "use_all_dns_ips",
    )
    .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Config | ErrorKind::Dns), "{:?}", err);
}

#[test]
fn bad_hostname_next_to_good_one() {
    let bootstrap =
        Bootstrap::with_resolver(StaticResolver::new(), DnsLookupStrategy::UseAllDnsIps);
    let report = bootstrap
        .resolve_report(&["some.invalid.hostname.foo.bar.local:9999", "127.0.0.1:9092"])
        .unwrap();
    assert_eq!(report.addresses.len(), 1);
    assert_eq!(report.unresolved.len(), 1);
    assert_eq!(report.unresolved[0].error.kind(), ErrorKind::HostNotFound);
}

#[test]
fn filter_preferred() {
    let v4 = ip("192.0.0.1");
    let v6 = ip("::1");

    let result = filter_preferred_addresses(&[v4, v6, v4]);
    assert!(result.contains(&v4));
    assert!(!result.contains(&v6));
    assert_eq!(result.len(), 2);

    let result = filter_preferred_addresses(&[v6, v4, v4]);
    assert!(result.contains(&v6));
    assert!(!result.contains(&v4));
    assert_eq!(result.len(), 1);
}

#[test]
fn resolve_unknown_host() {
    let err = resolve("some.invalid.hostname.foo.bar.local", &StaticResolver::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::HostNotFound);

    let err = resolve("some.invalid.hostname.foo.bar.local", &SystemResolver).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::HostNotFound | ErrorKind::Dns), "{:?}", err);
}

#[test]
fn resolve_dns_lookup() {
    let addresses = vec![ip("198.51.100.0"), ip("198.51.100.5")];
    let resolver = AddressChangeResolver::new(addresses.clone(), addresses.clone());
    assert_eq!(resolve("kafka.apache.org", &resolver).unwrap(), addresses);
}

#[test]
fn parse_and_validate_with_dns_lookup() {
    let addresses = vec![ip("198.51.100.0"), ip("198.51.100.5")];
    for strategy in ["use_all_dns_ips", "resolve_canonical_bootstrap_servers_only"] {
        let resolver = AddressChangeResolver::new(addresses.clone(), addresses.clone());
        let addrs =
            parse_and_validate_addresses_with(&["kafka.apache.org:9092"], strategy, &resolver)
                .unwrap();
        let ips: Vec<IpAddr> = addrs.iter().map(ResolvedAddress::ip).collect();
        assert_eq!(ips, addresses, "{}", strategy);
        assert!(addrs.iter().all(|a| a.port() == 9092), "{}", strategy);
        assert_eq!(resolver.resolution_count(), 1);
    }
}

#[test]
fn re_resolution_sees_rotated_records() {
    let initial = vec![ip("198.51.100.0"), ip("198.51.100.5")];
    let rotated = vec![ip("198.51.100.7")];
    let resolver = AddressChangeResolver::new(initial.clone(), rotated.clone());
    let bootstrap = Bootstrap::with_resolver(&resolver, DnsLookupStrategy::UseAllDnsIps);

    let first = bootstrap.resolve_addresses(&["kafka.apache.org:9092"]).unwrap();
    let second = bootstrap.resolve_addresses(&["kafka.apache.org:9092"]).unwrap();

    let ips = |addrs: &[ResolvedAddress]| addrs.iter().map(ResolvedAddress::ip).collect::<Vec<_>>();
    assert_eq!(ips(&first), initial);
    assert_eq!(ips(&second), rotated);
    assert!(first.iter().chain(&second).all(|a| a.port() == 9092));
    assert_eq!(resolver.resolution_count(), 2);
}
