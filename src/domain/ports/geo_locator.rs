//! Geolocation Port
//!
//! Defines the interface for turning an IP address into location data.

use crate::domain::entities::LocationRecord;
use crate::domain::error::LocateError;
use async_trait::async_trait;
use std::net::IpAddr;

/// Lookup of location data for an IP address.
///
/// This is an outbound port that abstracts the geolocation service.
/// Implementations may call ipinfo.io or any API with a compatible record shape.
#[async_trait]
pub trait GeoLocator: Send + Sync {
    /// Fetch the location record for `ip`.
    ///
    /// `None` asks for the caller's own public address, as the service sees it.
    async fn locate(&self, ip: Option<IpAddr>) -> Result<LocationRecord, LocateError>;
}
