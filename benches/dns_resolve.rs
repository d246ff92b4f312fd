use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use bootstrap_resolver::dns::{filter_preferred_addresses, DnsLookupStrategy, StaticResolver};
use bootstrap_resolver::{Bootstrap, Endpoint};

fn mixed_addresses(n: u32) -> Vec<IpAddr> {
    (0..n)
        .map(|i| {
            if i % 3 == 0 {
                IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, i as u16))
            } else {
                IpAddr::V4(Ipv4Addr::new(10, 0, (i >> 8) as u8, i as u8))
            }
        })
        .collect()
}

fn bench_endpoint_parse(c: &mut Criterion) {
    let entries = [
        "broker-1.kafka.internal:9092",
        "10.0.0.1:9092",
        "[2001:db8:85a3:8d3:1319:8a2e:370:7348]:9093",
    ];
    c.bench_function("endpoint_parse", |b| {
        b.iter(|| {
            for entry in &entries {
                black_box(Endpoint::parse(black_box(entry)).ok());
            }
        });
    });
}

fn bench_filter_preferred(c: &mut Criterion) {
    let addrs = mixed_addresses(64);
    c.bench_function("filter_preferred_64", |b| {
        b.iter(|| {
            black_box(filter_preferred_addresses(black_box(&addrs)));
        });
    });
}

fn bench_bootstrap_static(c: &mut Criterion) {
    let mut resolver = StaticResolver::new();
    let mut servers = Vec::new();
    for i in 0..50u32 {
        let host = format!("broker-{}.kafka.internal", i);
        resolver.insert(&host, mixed_addresses(4).into_iter().map(|ip| match ip {
            IpAddr::V4(v4) => IpAddr::V4(Ipv4Addr::from(u32::from(v4) + i)),
            v6 => v6,
        }));
        servers.push(format!("{}:9092", host));
    }

    for strategy in DnsLookupStrategy::ALL {
        let bootstrap = Bootstrap::with_resolver(&resolver, strategy);
        c.bench_function(&format!("bootstrap_50_hosts_{}", strategy), |b| {
            b.iter(|| {
                black_box(bootstrap.resolve_addresses(servers.as_slice()).ok());
            });
        });
    }
}

criterion_group!(
    benches,
    bench_endpoint_parse,
    bench_filter_preferred,
    bench_bootstrap_static,
);
criterion_main!(benches);
