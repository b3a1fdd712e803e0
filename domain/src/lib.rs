//! Protocol logic of the relying party: building the authorization redirect,
//! exchanging the authorization code, calling the protected API and inspecting
//! the access token. Everything here is stateless; configuration and the
//! outbound HTTP client are borrowed from the caller.

pub mod authorization;
pub mod error;
pub mod jwt;
pub mod protected_api;
pub mod token_exchange;

pub mod gateway;

pub use error::Error;
