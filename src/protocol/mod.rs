//! HTTP API wire types.

mod messages;

pub use messages::*;
