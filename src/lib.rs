//! ip-locate Library
//!
//! This module exposes the ip-locate components for use in integration tests
//! and as a library.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use application::LocateService;
pub use config::{load_config, Config, DnsBackend};
pub use domain::entities::{LocationQuery, LocationRecord};
pub use domain::error::LocateError;
pub use domain::ports::{GeoLocator, HostResolver};
pub use domain::services::DistanceCalculator;
pub use domain::value_objects::{Coordinates, Distance};
