mod distance_calculator;

pub use distance_calculator::{DistanceCalculator, EARTH_RADIUS_KM};
