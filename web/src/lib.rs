//! HTTP surface of the relying party.
//!
//! Five exact-match GET routes (see [`router::Route`]), everything else is a 404.
//! The only state a browser carries between requests is the access token cookie.

use std::sync::Arc;

use log::*;
use service::config::Config;
use tokio::net::TcpListener;

pub use error::{Error, Result};
pub use render::PageShell;
pub use session::SessionCookie;

mod controller;
mod error;
mod extractors;
pub mod fragment;
mod params;
pub mod render;
pub mod response;
pub mod router;
pub mod session;

/// Router state shared by every handler. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub service_state: service::AppState,
    pub page_shell: Arc<PageShell>,
    pub session_cookie: SessionCookie,
}

impl AppState {
    pub fn new(service_state: service::AppState, page_shell: PageShell) -> Self {
        let session_cookie = SessionCookie::from_config(&service_state.config);
        Self {
            service_state,
            page_shell: Arc::new(page_shell),
            session_cookie,
        }
    }

    pub fn config(&self) -> &Config {
        &self.service_state.config
    }

    pub fn http_client(&self) -> &reqwest::Client {
        self.service_state.http_client_ref()
    }
}

/// Binds the configured interface and port and serves until Ctrl-C.
pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let server_url = format!(
        "{}:{}",
        app_state.config().interface(),
        app_state.config().port
    );

    let listener = TcpListener::bind(&server_url).await?;
    info!("Server starting... listening for connections on http://{server_url}");

    axum::serve(listener, router::define_routes(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, stopping server"),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {e}");
            std::future::pending::<()>().await
        }
    }
}
