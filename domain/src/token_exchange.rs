//! Authorization code exchange against the token endpoint.
//!
//! The exchange is single-shot. Whatever goes wrong (the endpoint is unreachable,
//! answers with something that is not JSON, or answers without an access token)
//! the caller sees a [`TokenExchange::Rejected`]. The [`RejectionReason`] is only
//! meant for logs.

use crate::gateway::authorization_server::AuthorizationServerClient;
use log::*;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use service::config::Config;

/// Body of the authorization-code token request, in wire order.
#[derive(Debug, Serialize)]
struct TokenExchangeRequest<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
    code: &'a str,
}

/// The fields of a token endpoint response this client looks at. Values are kept
/// loosely typed since servers disagree on what goes in them.
#[derive(Debug, Default, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Value,
    #[serde(default)]
    hint: Value,
    #[serde(default)]
    error_description: Value,
}

#[derive(Debug)]
pub enum TokenExchange {
    Issued(SecretString),
    Rejected {
        hint: Option<String>,
        reason: RejectionReason,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// The request never produced a response body.
    Transport,
    /// The body was not a JSON object.
    MalformedBody,
    /// The body was JSON but carried no usable `access_token`.
    NoAccessToken,
}

impl TokenExchange {
    fn rejected(reason: RejectionReason) -> Self {
        TokenExchange::Rejected { hint: None, reason }
    }
}

/// Swap an authorization code for an access token.
pub async fn exchange_code(
    http_client: &reqwest::Client,
    config: &Config,
    authorization_code: &str,
) -> TokenExchange {
    let request = TokenExchangeRequest {
        grant_type: "authorization_code",
        client_id: config.client_id(),
        client_secret: config.client_secret().expose_secret(),
        redirect_uri: config.redirect_uri(),
        code: authorization_code,
    };

    debug!("Exchanging authorization code at {}", config.token_endpoint());

    let body = match AuthorizationServerClient::new(http_client)
        .post_form(config.token_endpoint(), &request)
        .await
    {
        Ok(body) => body,
        Err(e) => {
            warn!("Token exchange rejected (transport): {e}");
            return TokenExchange::rejected(RejectionReason::Transport);
        }
    };

    let outcome = interpret_token_response(&body);
    match &outcome {
        TokenExchange::Issued(_) => info!("Token endpoint issued an access token"),
        TokenExchange::Rejected { hint, reason } => {
            warn!("Token exchange rejected ({reason:?}), hint: {hint:?}")
        }
    }
    outcome
}

/// Decide what a token endpoint response body means.
pub fn interpret_token_response(body: &str) -> TokenExchange {
    let response: TokenResponse = match serde_json::from_str::<Value>(body) {
        Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
        Ok(other) => {
            debug!("Token response is JSON but not an object: {other}");
            return TokenExchange::rejected(RejectionReason::MalformedBody);
        }
        Err(e) => {
            debug!("Token response is not JSON: {e}");
            return TokenExchange::rejected(RejectionReason::MalformedBody);
        }
    };

    if let Some(description) = display_value(&response.error_description) {
        debug!("Token endpoint error_description: {description}");
    }

    match truthy_token(&response.access_token) {
        Some(token) => TokenExchange::Issued(SecretString::new(token)),
        None => TokenExchange::Rejected {
            hint: display_value(&response.hint),
            reason: RejectionReason::NoAccessToken,
        },
    }
}

/// The access token as a string, unless the value is absent, empty or otherwise falsy.
fn truthy_token(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() && s != "0" => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        _ => None,
    }
}

/// A response field rendered for display, unless it is absent.
fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
