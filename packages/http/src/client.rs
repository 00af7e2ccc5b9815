use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::value::Value as JsonValue;
use url::Url;

use crate::error::Error;

/// A thin JSON API client over a configurable base URL and timeout.
///
/// `get` and `post` absorb every transport, status and decode failure into
/// `None` plus an error-level log line; callers that need the cause use the
/// `try_*` variants instead.
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<ApiClient, Error> {
        let base_url = Url::parse(base_url)?;
        let client = Client::builder().timeout(timeout).build()?;

        log::info!("ApiClient initialized with base_url: {}", base_url);
        Ok(ApiClient { client, base_url })
    }

    /// Join `endpoint` onto the base URL, tolerating slashes on either side.
    fn endpoint_url(&self, endpoint: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let url = format!("{}/{}", base, endpoint.trim_start_matches('/'));
        Url::parse(&url).map_err(Error::from)
    }

    /// GET `endpoint` and decode the JSON response body.
    ///
    /// Any failure (transport, non-2xx status, undecodable body) yields
    /// `None` with a logged diagnostic.
    pub fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Option<JsonValue> {
        match self.try_get(endpoint, params) {
            Ok(body) => {
                log::info!("GET {} succeeded", endpoint);
                Some(body)
            }
            Err(error) => {
                log::error!("Request error for GET {}: {}", endpoint, error);
                None
            }
        }
    }

    /// POST `body` as JSON to `endpoint` and decode the JSON response body.
    ///
    /// Same error policy as [`ApiClient::get`].
    pub fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Option<JsonValue> {
        match self.try_post(endpoint, body) {
            Ok(response_body) => {
                log::info!("POST {} succeeded", endpoint);
                Some(response_body)
            }
            Err(error) => {
                log::error!("Request error for POST {}: {}", endpoint, error);
                None
            }
        }
    }

    pub fn try_get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<JsonValue, Error> {
        let url = self.endpoint_url(endpoint)?;

        let mut request = self.client.get(url);
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request.send()?.error_for_status()?;
        let text = response.text()?;
        let body = serde_json::from_str(&text)?;
        Ok(body)
    }

    pub fn try_post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<JsonValue, Error> {
        let url = self.endpoint_url(endpoint)?;

        let response = self.client.post(url).json(body).send()?.error_for_status()?;
        let text = response.text()?;
        let response_body = serde_json::from_str(&text)?;
        Ok(response_body)
    }
}
