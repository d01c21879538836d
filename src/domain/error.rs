//! Domain Errors
//!
//! Failure kinds surfaced by the resolver and distance pipeline.
//! Adapters translate library errors into these variants at the port boundary.

/// Error returned by any location lookup.
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    /// Forward DNS lookup failed or produced no address.
    #[error("could not resolve host {host}: {reason}")]
    Lookup { host: String, reason: String },

    /// Transport-level failure talking to the geolocation service.
    #[error("request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    /// The geolocation service answered with something that is not a location record.
    #[error("malformed response from geolocation service: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },

    /// The location record has no usable coordinates.
    #[error("no usable coordinates for {ip}: {reason}")]
    Data { ip: String, reason: String },
}

impl LocateError {
    pub fn lookup(host: impl Into<String>, reason: impl ToString) -> Self {
        Self::Lookup {
            host: host.into(),
            reason: reason.to_string(),
        }
    }

    pub fn network(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Network {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}
