//! Controller for the authorization-code flow: login redirect, callback and logout.

use crate::fragment::Notice;
use crate::params::callback::CallbackParams;
use crate::response::Outcome;
use crate::{AppState, Error};

use axum::extract::{Query, State};
use domain::authorization;
use domain::token_exchange::{self, TokenExchange};
use log::*;
use secrecy::ExposeSecret;

/// GET /login
///
/// Redirects the browser to the authorization server's authorize endpoint.
pub async fn login(State(app_state): State<AppState>) -> Outcome {
    let url = authorization::authorization_url(app_state.config());
    info!("Redirecting to authorization server");
    Outcome::redirect(url)
}

/// GET /callback
///
/// Exchanges the authorization code for an access token, stores it in the session
/// cookie and sends the browser home. Any failure is rendered in place and no cookie
/// is set.
pub async fn callback(
    State(app_state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Outcome, Error> {
    let params = CallbackParams::from_pairs(pairs);
    let Some(code) = params.code else {
        warn!(
            "Callback without authorization code, error_description: {:?}",
            params.error_description
        );
        let notice = Notice::MissingCode {
            error_description: params.error_description,
        };
        return Ok(Outcome::Rendered(
            app_state.page_shell.render(&notice.to_html()),
        ));
    };

    let access_token =
        match token_exchange::exchange_code(app_state.http_client(), app_state.config(), &code)
            .await
        {
            TokenExchange::Issued(access_token) => access_token,
            TokenExchange::Rejected { hint, .. } => {
                let notice = Notice::TokenExchangeFailed { hint };
                return Ok(Outcome::Rendered(
                    app_state.page_shell.render(&notice.to_html()),
                ));
            }
        };

    let cookie = app_state.session_cookie.set(
        access_token.expose_secret(),
        app_state.config().session_cookie_ttl(),
    )?;

    info!("Access token stored in session cookie");
    Ok(Outcome::redirect_with_cookie("/", cookie))
}

/// GET /logout
///
/// Drops the session cookie. The token itself stays valid at the authorization
/// server until it expires.
pub async fn logout(State(app_state): State<AppState>) -> Result<Outcome, Error> {
    let cookie = app_state.session_cookie.clear()?;
    info!("Session cookie cleared");
    Ok(Outcome::redirect_with_cookie("/", cookie))
}
