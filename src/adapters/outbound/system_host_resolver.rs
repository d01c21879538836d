//! System Host Resolver
//!
//! Implements HostResolver with the platform resolver (getaddrinfo via tokio),
//! so /etc/hosts, nsswitch and search domains behave as for any other program.

use crate::domain::error::LocateError;
use crate::domain::ports::HostResolver;
use async_trait::async_trait;
use std::net::IpAddr;

/// Platform DNS resolver.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHostResolver;

impl SystemHostResolver {
    pub fn new() -> Self {
        Self
    }

    /// First IPv4 address, else the first address of any family.
    fn pick_address(addrs: &[IpAddr]) -> Option<IpAddr> {
        addrs
            .iter()
            .find(|ip| ip.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
    }
}

#[async_trait]
impl HostResolver for SystemHostResolver {
    async fn lookup(&self, host: &str) -> Result<IpAddr, LocateError> {
        tracing::debug!("resolving {} via system resolver", host);

        let addrs: Vec<IpAddr> = tokio::net::lookup_host((host, 0))
            .await
            .map_err(|e| LocateError::lookup(host, e))?
            .map(|addr| addr.ip())
            .collect();

        let ip = Self::pick_address(&addrs)
            .ok_or_else(|| LocateError::lookup(host, "no addresses returned"))?;

        tracing::debug!("{} resolved to {} ({} candidates)", host, ip, addrs.len());
        Ok(ip)
    }
}
