//! ipinfo.io Geolocation Adapter
//!
//! Implements GeoLocator with a single HTTP GET against ipinfo.io
//! (or any service exposing the same `/<ip>` and `/json` endpoints).

use crate::domain::entities::LocationRecord;
use crate::domain::error::LocateError;
use crate::domain::ports::GeoLocator;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::net::IpAddr;
use std::time::Duration;

/// Configuration for the ipinfo client.
#[derive(Debug, Clone)]
pub struct IpInfoConfig {
    /// Base URL of the service (e.g., "https://ipinfo.io")
    pub base_url: String,
    /// Access token, sent as the `token` query parameter
    pub token: Option<String>,
    /// Request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for IpInfoConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ipinfo.io".to_string(),
            token: None,
            timeout: None,
        }
    }
}

/// Geolocation client for ipinfo.io.
pub struct IpInfoGeoLocator {
    config: IpInfoConfig,
    client: reqwest::Client,
}

impl IpInfoGeoLocator {
    /// Create a client with the given configuration.
    pub fn new(config: IpInfoConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            config,
            client: builder.build()?,
        })
    }

    /// URL for a lookup. The caller's own address lives under `/json`.
    fn endpoint(&self, ip: Option<IpAddr>) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        match ip {
            Some(ip) => format!("{}/{}", base, ip),
            None => format!("{}/json", base),
        }
    }
}

#[async_trait]
impl GeoLocator for IpInfoGeoLocator {
    async fn locate(&self, ip: Option<IpAddr>) -> Result<LocationRecord, LocateError> {
        let url = self.endpoint(ip);
        tracing::debug!("geolocation request GET {}", url);

        let mut request = self.client.get(&url).header(ACCEPT, "application/json");
        if let Some(token) = &self.config.token {
            request = request.query(&[("token", token)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LocateError::network(&url, e))?;

        // The body is decoded regardless of status; ipinfo answers some
        // errors (e.g. bogon lookups) with a usable record.
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("geolocation service returned {} for {}", status, url);
        }

        let body = response
            .text()
            .await
            .map_err(|e| LocateError::network(&url, e))?;

        let record: LocationRecord = serde_json::from_str(&body)?;
        tracing::debug!(
            "located {} city={:?} loc={:?}",
            record.ip,
            record.city,
            record.loc
        );

        Ok(record)
    }
}
