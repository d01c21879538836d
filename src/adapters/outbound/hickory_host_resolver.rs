//! Hickory Host Resolver
//!
//! Implements HostResolver with direct A-record queries through hickory-resolver,
//! bypassing the platform's getaddrinfo.

use crate::domain::error::LocateError;
use crate::domain::ports::HostResolver;
use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;
use std::net::IpAddr;

/// A-record resolver backed by hickory.
pub struct HickoryHostResolver {
    resolver: TokioAsyncResolver,
}

impl HickoryHostResolver {
    /// Build a resolver from an explicit configuration.
    pub fn new(config: ResolverConfig, opts: ResolverOpts) -> Self {
        Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
        }
    }

    /// Build a resolver from the system configuration (resolv.conf).
    pub fn from_system_conf() -> anyhow::Result<Self> {
        Ok(Self {
            resolver: TokioAsyncResolver::tokio_from_system_conf()?,
        })
    }
}

#[async_trait]
impl HostResolver for HickoryHostResolver {
    async fn lookup(&self, host: &str) -> Result<IpAddr, LocateError> {
        tracing::debug!("resolving {} via hickory (A)", host);

        let answer = self
            .resolver
            .ipv4_lookup(host)
            .await
            .map_err(|e| LocateError::lookup(host, e))?;

        let ip = answer
            .iter()
            .next()
            .map(|a| IpAddr::V4(a.0))
            .ok_or_else(|| LocateError::lookup(host, "no A records"))?;

        tracing::debug!("{} resolved to {}", host, ip);
        Ok(ip)
    }
}
