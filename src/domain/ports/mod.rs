mod geo_locator;
mod host_resolver;

pub use geo_locator::GeoLocator;
pub use host_resolver::HostResolver;
