use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use bootstrap_resolver::common::addr::split_bootstrap_servers;
use bootstrap_resolver::config::{load_config, Config};
use bootstrap_resolver::dns::DnsLookupStrategy;

/// Resolve bootstrap servers into the addresses a client would connect to.
#[derive(Debug, Parser)]
#[command(name = "bootstrap-resolver", version)]
struct Cli {
    /// YAML config file
    #[arg(short, long, conflicts_with = "bootstrap_servers")]
    config: Option<String>,

    /// Comma-separated `host:port` list
    #[arg(short, long, value_name = "SERVERS")]
    bootstrap_servers: Option<String>,

    /// use_all_dns_ips or resolve_canonical_bootstrap_servers_only
    #[arg(long, value_name = "STRATEGY")]
    client_dns_lookup: Option<String>,

    /// Nameserver to query instead of the system resolver (repeatable)
    #[arg(long = "nameserver", value_name = "IP[:PORT]")]
    nameservers: Vec<String>,

    /// DNS query timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.level)),
        )
        .init();

    info!(
        servers = config.bootstrap_servers.len(),
        strategy = %config.client_dns_lookup,
        "resolving bootstrap servers"
    );

    let report = config
        .bootstrap()?
        .resolve_report(config.bootstrap_servers.as_slice())?;
    for unresolved in &report.unresolved {
        warn!(
            endpoint = %unresolved.endpoint,
            kind = unresolved.error.kind().as_str(),
            error = %unresolved.error,
            "skipped"
        );
    }
    for addr in &report.addresses {
        println!("{}", addr);
    }
    Ok(())
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = match (&cli.config, &cli.bootstrap_servers) {
        (Some(path), _) => load_config(path)?,
        (None, Some(list)) => Config::new(split_bootstrap_servers(list), DnsLookupStrategy::default()),
        (None, None) => anyhow::bail!("either --config or --bootstrap-servers is required"),
    };

    if let Some(name) = &cli.client_dns_lookup {
        config.client_dns_lookup = DnsLookupStrategy::for_config(name)?;
    }
    if !cli.nameservers.is_empty() {
        config.dns.servers = cli.nameservers.clone();
    }
    if cli.timeout_secs.is_some() {
        config.dns.timeout_secs = cli.timeout_secs;
    }
    config.validate()?;
    Ok(config)
}
