use log::{error, info};
use service::{config::Config, logging::Logger};
use web::{AppState, PageShell};

#[tokio::main]
async fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to start logger: {e}");
        std::process::exit(1);
    }

    info!(
        "Starting OAuth2 client [{}] against token endpoint {}",
        config.client_id(),
        config.token_endpoint()
    );

    let http_client = match service::init_http_client(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build outbound HTTP client: {e}");
            std::process::exit(1);
        }
    };

    let page_shell = match PageShell::from_config(&config) {
        Ok(shell) => shell,
        Err(e) => {
            error!("Failed to load page template: {e}");
            std::process::exit(1);
        }
    };

    let app_state = AppState::new(service::AppState::new(config, http_client), page_shell);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server stopped with error: {e}");
        std::process::exit(1);
    }
}
