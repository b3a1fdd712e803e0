//! The single value every handler produces.

use axum::http::header::{LOCATION, SET_COOKIE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use log::*;

/// Result of handling one request. Handlers build exactly one of these and return it;
/// nothing runs after a page has been rendered or a redirect decided.
#[derive(Debug)]
pub enum Outcome {
    /// 302 to `location`, optionally setting or clearing the session cookie.
    Redirect {
        location: String,
        set_cookie: Option<HeaderValue>,
    },
    /// 200 with a fully rendered HTML document.
    Rendered(String),
    /// 404 with a plain-text body.
    NotFound,
}

impl Outcome {
    pub fn redirect(location: impl Into<String>) -> Self {
        Outcome::Redirect {
            location: location.into(),
            set_cookie: None,
        }
    }

    pub fn redirect_with_cookie(location: impl Into<String>, set_cookie: HeaderValue) -> Self {
        Outcome::Redirect {
            location: location.into(),
            set_cookie: Some(set_cookie),
        }
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Outcome::Redirect {
                location,
                set_cookie,
            } => {
                let location = match HeaderValue::try_from(location) {
                    Ok(location) => location,
                    Err(e) => {
                        error!("Redirect target is not a valid Location header: {e}");
                        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                    }
                };
                let mut response = (StatusCode::FOUND, [(LOCATION, location)]).into_response();
                if let Some(cookie) = set_cookie {
                    response.headers_mut().insert(SET_COOKIE, cookie);
                }
                response
            }
            Outcome::Rendered(document) => Html(document).into_response(),
            Outcome::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
        }
    }
}
