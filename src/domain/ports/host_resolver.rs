//! Host Resolver Port
//!
//! Defines the interface for forward DNS lookups.

use crate::domain::error::LocateError;
use async_trait::async_trait;
use std::net::IpAddr;

/// Forward lookup of a hostname to a single IP address.
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Resolve `host` to one address, preferring IPv4.
    ///
    /// Fails with [`LocateError::Lookup`] when the name does not resolve.
    async fn lookup(&self, host: &str) -> Result<IpAddr, LocateError>;
}
