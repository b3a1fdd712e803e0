//! Outbound HTTP gateways.

pub mod authorization_server;
