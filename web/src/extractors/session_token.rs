use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use log::*;

use crate::session::SessionCookie;

/// The access token from the session cookie, or `None` when the browser sent none.
/// Never rejects: a missing token is a normal state the handlers render.
pub(crate) struct SessionToken(pub Option<String>);

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = SessionCookie::get(&parts.headers);
        trace!("Session token present: {}", token.is_some());
        Ok(SessionToken(token))
    }
}
