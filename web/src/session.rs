//! Client-side session: the access token lives in a single cookie and nowhere else.
//!
//! The cookie is neither signed nor encrypted. `HttpOnly`, `Secure` and `SameSite`
//! are only added when configured.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use service::config::{Config, CookieSameSite};

use crate::Error;

pub const SESSION_COOKIE_NAME: &str = "access_token";

/// Attributes attached to every `Set-Cookie` written for the session.
#[derive(Clone, Debug, Default)]
pub struct SessionCookie {
    http_only: bool,
    secure: bool,
    same_site: Option<CookieSameSite>,
}

impl SessionCookie {
    pub fn from_config(config: &Config) -> Self {
        Self {
            http_only: config.cookie_http_only,
            secure: config.cookie_secure,
            same_site: config.cookie_same_site,
        }
    }

    /// `Set-Cookie` value storing `token` for `ttl` from now.
    pub fn set(&self, token: &str, ttl: Duration) -> Result<HeaderValue, Error> {
        let expires = httpdate::fmt_http_date(SystemTime::now() + ttl);
        self.header_value(&urlencoding::encode(token), &expires, ttl.as_secs())
    }

    /// `Set-Cookie` value that makes the browser drop the token immediately.
    pub fn clear(&self) -> Result<HeaderValue, Error> {
        let expires = httpdate::fmt_http_date(UNIX_EPOCH);
        self.header_value("", &expires, 0)
    }

    /// The token carried by the request, if any.
    pub fn get(headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE_NAME)
            .map(|(_, value)| value.trim_matches('"'))
            .filter(|value| !value.is_empty())
            .map(|value| {
                urlencoding::decode(value)
                    .map(|decoded| decoded.into_owned())
                    .unwrap_or_else(|_| value.to_string())
            })
    }

    fn header_value(&self, value: &str, expires: &str, max_age: u64) -> Result<HeaderValue, Error> {
        let mut cookie =
            format!("{SESSION_COOKIE_NAME}={value}; Expires={expires}; Max-Age={max_age}; Path=/");
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        if let Some(same_site) = self.same_site {
            cookie.push_str(&format!("; SameSite={same_site}"));
        }

        HeaderValue::try_from(cookie)
            .map_err(|_| domain::Error::internal("Session cookie is not a valid header value").into())
    }
}
