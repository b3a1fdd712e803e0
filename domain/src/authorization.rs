//! Login initiation: the URL the user agent is sent to in order to authenticate
//! with the authorization server.
//!
//! No `state` parameter is generated, so the callback cannot tell a response it
//! asked for from one it did not.

use log::*;
use service::config::Config;

/// Build the authorization endpoint URL for the authorization-code grant.
pub fn authorization_url(config: &Config) -> String {
    let endpoint = config.authorization_endpoint();
    let separator = if endpoint.contains('?') { '&' } else { '?' };

    let url = format!(
        "{}{}\
        response_type=code&\
        client_id={}&\
        redirect_uri={}&\
        scope={}",
        endpoint,
        separator,
        urlencoding::encode(config.client_id()),
        urlencoding::encode(config.redirect_uri()),
        urlencoding::encode(config.scope()),
    );

    debug!("Authorization URL: {url}");
    url
}
