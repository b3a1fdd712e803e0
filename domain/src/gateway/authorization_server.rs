//! HTTP adapter for the authorization server and the API it protects.
//!
//! Both calls hand back the raw response body whatever the status code: the
//! token endpoint reports `invalid_grant` and friends as JSON on a 4xx, and the
//! caller decides what the body means.

use crate::error::Error;
use log::*;
use serde::Serialize;

pub struct AuthorizationServerClient<'a> {
    client: &'a reqwest::Client,
}

impl<'a> AuthorizationServerClient<'a> {
    pub fn new(client: &'a reqwest::Client) -> Self {
        Self { client }
    }

    /// POST a form-encoded body and return the raw response body.
    pub async fn post_form<T>(&self, url: &str, form: &T) -> Result<String, Error>
    where
        T: Serialize + ?Sized,
    {
        debug!("POST {url}");

        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .await
            .inspect_err(|e| warn!("POST {url} failed: {e:?}"))?;

        Self::read_body(url, response).await
    }

    /// GET with an `Authorization: Bearer` header and return the raw response body.
    pub async fn get_with_bearer(&self, url: &str, bearer_token: &str) -> Result<String, Error> {
        debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .bearer_auth(bearer_token)
            .send()
            .await
            .inspect_err(|e| warn!("GET {url} failed: {e:?}"))?;

        Self::read_body(url, response).await
    }

    async fn read_body(url: &str, response: reqwest::Response) -> Result<String, Error> {
        let status = response.status();
        if status.is_success() {
            debug!("{url} answered {status}");
        } else {
            warn!("{url} answered {status}");
        }

        Ok(response
            .text()
            .await
            .inspect_err(|e| warn!("Failed to read body from {url}: {e:?}"))?)
    }
}
