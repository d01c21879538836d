//! ip-locate - locate IPs and hostnames, measure the distance between them
//!
//! This is the composition root that wires together all the components.

use clap::Parser;
use ip_locate::adapters::inbound::{render_error, Cli, CommandRunner};
use ip_locate::adapters::outbound::{
    HickoryHostResolver, IpInfoConfig, IpInfoGeoLocator, SystemHostResolver,
};
use ip_locate::{load_config, DnsBackend, HostResolver, LocateService};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging; stdout is reserved for command output
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        "starting ip-locate api={} dns={}",
        cfg.api_url,
        cfg.dns_backend.as_str()
    );

    // ===== COMPOSITION ROOT =====

    // Geolocation client (ipinfo)
    let geo_locator = Arc::new(IpInfoGeoLocator::new(IpInfoConfig {
        base_url: cfg.api_url.clone(),
        token: cfg.token.clone(),
        timeout: cfg.timeout(),
    })?);

    // Host resolver
    let host_resolver: Arc<dyn HostResolver> = match cfg.dns_backend {
        DnsBackend::System => Arc::new(SystemHostResolver::new()) as Arc<dyn HostResolver>,
        DnsBackend::Hickory => match HickoryHostResolver::from_system_conf() {
            Ok(r) => Arc::new(r) as Arc<dyn HostResolver>,
            Err(e) => {
                tracing::warn!(
                    "failed to load system DNS config, using system resolver: {:?}",
                    e
                );
                Arc::new(SystemHostResolver::new())
            }
        },
    };

    let service = Arc::new(LocateService::new(geo_locator, host_resolver));
    let runner = CommandRunner::new(service);

    match runner.run(&cli.mode()).await {
        Ok(output) => {
            println!("{}", output);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::debug!("command failed: {:?}", e);
            println!("{}", render_error(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}
