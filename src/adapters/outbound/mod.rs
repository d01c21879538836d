mod hickory_host_resolver;
mod ipinfo_geo_locator;
mod system_host_resolver;

pub use hickory_host_resolver::HickoryHostResolver;
pub use ipinfo_geo_locator::{IpInfoConfig, IpInfoGeoLocator};
pub use system_host_resolver::SystemHostResolver;
