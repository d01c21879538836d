//! Domain layer: entities, value objects, ports and pure services.
//!
//! Nothing in here performs I/O.

pub mod entities;
pub mod error;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{LocationQuery, LocationRecord};
pub use error::LocateError;
pub use value_objects::{Coordinates, Distance};
