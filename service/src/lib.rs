use config::Config;
use log::{info, warn};

pub mod config;
pub mod logging;

/// Builds the outbound HTTP client shared by the token exchange and the API call.
pub fn init_http_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    info!(
        "Outbound HTTP client config: timeout={}s, verify_tls={}",
        config.http_timeout_secs, !config.danger_accept_invalid_certs,
    );

    if config.danger_accept_invalid_certs {
        warn!("TLS certificate verification is DISABLED for outbound calls");
    }

    reqwest::Client::builder()
        .use_rustls_tls()
        .timeout(config.http_timeout())
        .user_agent(concat!("oauth2-client-demo/", env!("CARGO_PKG_VERSION")))
        .danger_accept_invalid_certs(config.danger_accept_invalid_certs)
        .build()
}

// Service-level state containing only infrastructure concerns
// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub http_client: reqwest::Client,
    pub config: Config,
}

impl AppState {
    pub fn new(app_config: Config, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            config: app_config,
        }
    }

    pub fn http_client_ref(&self) -> &reqwest::Client {
        &self.http_client
    }
}
