//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use crate::domain::services::DistanceCalculator;
use std::fmt;
use std::str::FromStr;

/// A point on the Earth's surface, in decimal degrees.
///
/// The geolocation service encodes this as a single `"lat,lon"` string;
/// [`Coordinates::from_str`] splits and parses that form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another point.
    pub fn distance_to(&self, other: &Coordinates) -> Distance {
        Distance::from_km(DistanceCalculator::haversine_km(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        ))
    }
}

/// Why a `"lat,lon"` string could not be turned into [`Coordinates`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordinatesError {
    #[error("expected \"lat,lon\", got {0} component(s)")]
    ComponentCount(usize),
    #[error("{0:?} is not a number")]
    NotANumber(String),
    #[error("latitude {0} outside -90..=90")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside -180..=180")]
    LongitudeOutOfRange(f64),
}

impl FromStr for Coordinates {
    type Err = CoordinatesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(CoordinatesError::ComponentCount(parts.len()));
        }

        let parse = |part: &str| {
            part.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| CoordinatesError::NotANumber(part.to_string()))
        };

        let (latitude, longitude) = (parse(parts[0])?, parse(parts[1])?);
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinatesError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinatesError::LongitudeOutOfRange(longitude));
        }

        Ok(Self::new(latitude, longitude))
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Great-circle distance in kilometers. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Distance(f64);

impl Distance {
    /// Negative values (and `-0.0`) become `0.0`; NaN is kept as NaN.
    pub fn from_km(km: f64) -> Self {
        Self(if km <= 0.0 { 0.0 } else { km })
    }

    pub fn km(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} km", self.0)
    }
}
