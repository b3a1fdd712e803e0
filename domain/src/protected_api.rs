//! Calls the protected API on behalf of the user holding an access token.

use crate::gateway::authorization_server::AuthorizationServerClient;
use log::*;
use serde_json::Value;
use service::config::Config;

/// What the API answered, for display. `response` is `Value::Null` when the call
/// failed or the body was not JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    pub endpoint: String,
    pub response: Value,
}

/// GET the configured API endpoint with the access token as bearer credential.
pub async fn call(http_client: &reqwest::Client, config: &Config, access_token: &str) -> ApiCall {
    let endpoint = config.api_endpoint().to_string();

    let response = match AuthorizationServerClient::new(http_client)
        .get_with_bearer(&endpoint, access_token)
        .await
    {
        Ok(body) => serde_json::from_str(&body).unwrap_or_else(|e| {
            warn!("API response from {endpoint} is not JSON: {e}");
            Value::Null
        }),
        Err(e) => {
            warn!("API call to {endpoint} failed: {e}");
            Value::Null
        }
    };

    ApiCall { endpoint, response }
}
