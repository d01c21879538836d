//! Domain Entities - Core business objects
//!
//! These entities represent the core concepts of the ip-locate domain:
//! what the user asked for and what the geolocation service answered.

use crate::domain::error::LocateError;
use crate::domain::value_objects::Coordinates;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

/// Dotted quad where every group is range-checked to 0-255.
static IPV4_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    let octet = "(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)";
    Regex::new(&format!(r"^{octet}\.{octet}\.{octet}\.{octet}$")).expect("valid IPv4 pattern")
});

/// What the user wants located.
///
/// Built once per invocation from command line input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationQuery {
    /// The caller's own public address, as seen by the geolocation service.
    Own,
    /// An IP literal, sent to the geolocation service as-is.
    Address(IpAddr),
    /// A hostname that must go through DNS first.
    Host(String),
}

impl LocationQuery {
    /// Classify raw user input.
    ///
    /// # Examples
    /// ```
    /// use ip_locate::domain::entities::LocationQuery;
    ///
    /// assert_eq!(LocationQuery::parse(None), LocationQuery::Own);
    /// assert!(matches!(LocationQuery::parse(Some("8.8.8.8")), LocationQuery::Address(_)));
    /// assert!(matches!(LocationQuery::parse(Some("256.1.1.1")), LocationQuery::Host(_)));
    /// ```
    pub fn parse(input: Option<&str>) -> Self {
        let input = match input.map(str::trim) {
            None | Some("") => return Self::Own,
            Some(s) => s,
        };

        if let Some(ip) = Self::parse_ipv4(input) {
            return Self::Address(IpAddr::V4(ip));
        }

        if let Ok(ip) = input.parse::<Ipv6Addr>() {
            return Self::Address(IpAddr::V6(ip));
        }

        Self::Host(input.to_string())
    }

    /// Match the range-aware IPv4 grammar. Leading zeros are tolerated
    /// (`010.0.0.1` is `10.0.0.1`).
    fn parse_ipv4(input: &str) -> Option<Ipv4Addr> {
        let caps = IPV4_LITERAL.captures(input)?;
        let mut octets = [0u8; 4];
        for (i, octet) in octets.iter_mut().enumerate() {
            *octet = caps.get(i + 1)?.as_str().parse().ok()?;
        }
        Some(Ipv4Addr::from(octets))
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Own => write!(f, "own address"),
            Self::Address(ip) => write!(f, "{}", ip),
            Self::Host(host) => write!(f, "{}", host),
        }
    }
}

/// Location data as returned by the geolocation service.
///
/// Only `ip` is required. Fields the service sends beyond the ones named
/// here are kept in `extra` so the record can be re-serialized unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Address the record describes
    pub ip: String,
    /// Reverse DNS name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal: Option<String>,
    /// Country code (ISO 3166-1 alpha-2)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Coordinates encoded as `"lat,lon"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<String>,
    /// Organization / ISP, usually prefixed with the AS number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl LocationRecord {
    /// Create a record carrying only an address.
    pub fn new(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            hostname: None,
            city: None,
            region: None,
            postal: None,
            country: None,
            loc: None,
            org: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Parse the `loc` field into coordinates.
    pub fn coordinates(&self) -> Result<Coordinates, LocateError> {
        let loc = self.loc.as_deref().ok_or_else(|| LocateError::Data {
            ip: self.ip.clone(),
            reason: "response has no \"loc\" field".to_string(),
        })?;

        loc.parse().map_err(|e| LocateError::Data {
            ip: self.ip.clone(),
            reason: format!("bad \"loc\" value {:?}: {}", loc, e),
        })
    }
}
