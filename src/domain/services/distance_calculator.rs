//! Distance Calculator Service
//!
//! Pure domain logic for great-circle distances.
//! This service has NO external dependencies - it's pure Rust.

/// Mean radius of the Earth in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance calculator.
///
/// Treats the Earth as a sphere of radius [`EARTH_RADIUS_KM`] and uses the
/// haversine formula, which stays numerically stable for small distances.
pub struct DistanceCalculator;

impl DistanceCalculator {
    /// Distance in kilometers between two points given in decimal degrees.
    ///
    /// Total over all finite inputs: deterministic, non-negative and
    /// symmetric under swapping the two points.
    ///
    /// # Example
    /// ```
    /// use ip_locate::domain::services::DistanceCalculator;
    ///
    /// let d = DistanceCalculator::haversine_km(0.0, 0.0, 0.0, 90.0);
    /// assert!((d - 10007.5).abs() < 0.1);
    /// ```
    pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
        let d_lat = (lat2 - lat1).to_radians();
        let d_lon = (lon2 - lon1).to_radians();
        let lat1 = lat1.to_radians();
        let lat2 = lat2.to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        // Rounding can push `a` a hair past 1.0 for antipodal points.
        let a = a.clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}
