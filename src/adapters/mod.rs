//! Adapters: the command line on the inbound side, HTTP and DNS on the outbound side.

pub mod inbound;
pub mod outbound;
