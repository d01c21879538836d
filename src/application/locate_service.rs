//! Locate Service - Main application use case
//!
//! Orchestrates the resolution pipeline (hostname -> IP -> location record)
//! and the distance pipeline on top of it. This is the primary interface
//! for the inbound adapter.

use crate::domain::entities::{LocationQuery, LocationRecord};
use crate::domain::error::LocateError;
use crate::domain::ports::{GeoLocator, HostResolver};
use crate::domain::value_objects::Distance;
use std::sync::Arc;

/// Locate service - main application use case.
///
/// This service orchestrates:
/// 1. Classifying the query (own address, IP literal, hostname)
/// 2. Forward DNS for hostnames
/// 3. The geolocation lookup
/// 4. Great-circle distance between two resolved locations
pub struct LocateService {
    geo_locator: Arc<dyn GeoLocator>,
    host_resolver: Arc<dyn HostResolver>,
}

impl LocateService {
    /// Create a new locate service.
    pub fn new(geo_locator: Arc<dyn GeoLocator>, host_resolver: Arc<dyn HostResolver>) -> Self {
        Self {
            geo_locator,
            host_resolver,
        }
    }

    /// Resolve a query to its location record.
    ///
    /// Hostnames go through DNS first; a failed lookup is returned as
    /// [`LocateError::Lookup`] without contacting the geolocation service.
    pub async fn resolve(&self, query: &LocationQuery) -> Result<LocationRecord, LocateError> {
        let ip = match query {
            LocationQuery::Own => None,
            LocationQuery::Address(ip) => Some(*ip),
            LocationQuery::Host(host) => {
                let ip = self.host_resolver.lookup(host).await?;
                tracing::debug!("host {} -> {}", host, ip);
                Some(ip)
            }
        };

        self.geo_locator.locate(ip).await
    }

    /// Distance between two queries.
    ///
    /// Both resolutions run concurrently. A failure of the first query is
    /// returned as soon as it happens and abandons the second; a failure of
    /// the second is only returned once the first has succeeded. The same
    /// precedence applies to missing coordinates.
    pub async fn find_distance(
        &self,
        from: &LocationQuery,
        to: &LocationQuery,
    ) -> Result<Distance, LocateError> {
        let first = self.resolve(from);
        let second = self.resolve(to);
        tokio::pin!(first, second);

        let (first, second) = tokio::select! {
            biased;
            a = &mut first => {
                let a = a?;
                (a, second.await?)
            }
            b = &mut second => {
                let a = first.await?;
                (a, b?)
            }
        };

        let a = first.coordinates()?;
        let b = second.coordinates()?;
        let distance = a.distance_to(&b);

        tracing::debug!(
            "distance {} ({}) -> {} ({}) = {}",
            from,
            a,
            to,
            b,
            distance
        );

        Ok(distance)
    }
}
