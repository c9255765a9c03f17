//! Shared HTTP plumbing: client construction with retry, JSON request helpers

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Url;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::FetchError;

const USER_AGENT: &str = concat!("citytour/", env!("CARGO_PKG_VERSION"));

/// Transport settings for one provider
#[derive(Debug, Clone, Copy)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub max_retries: u32,
    pub use_system_proxy: bool,
}

impl HttpSettings {
    #[must_use]
    pub fn new(timeout_seconds: u32, max_retries: u32, use_system_proxy: bool) -> Self {
        Self {
            timeout: Duration::from_secs(u64::from(timeout_seconds)),
            max_retries,
            use_system_proxy,
        }
    }
}

/// Build an HTTP client with transient-failure retry
pub fn build_client(settings: HttpSettings) -> Result<ClientWithMiddleware> {
    let mut builder = reqwest::Client::builder()
        .timeout(settings.timeout)
        .user_agent(USER_AGENT);

    // local proxies commonly break the provider endpoints
    if !settings.use_system_proxy {
        builder = builder.no_proxy();
    }

    let client = builder
        .build()
        .with_context(|| "Failed to create HTTP client")?;

    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(settings.max_retries);

    Ok(ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

/// Build a URL with encoded query parameters
pub fn url_with_params(base: &str, path: &str, params: &[(&str, &str)]) -> Result<Url, FetchError> {
    let raw = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    Url::parse_with_params(&raw, params).map_err(|e| FetchError::InvalidRequest(format!("{raw}: {e}")))
}

/// GET `url` and decode the JSON body
pub async fn get_json<T: DeserializeOwned>(client: &ClientWithMiddleware, url: Url) -> Result<T, FetchError> {
    // only the path is logged, query strings carry credentials
    debug!(host = url.host_str().unwrap_or_default(), path = url.path(), "GET");

    let response = client.get(url).send().await?;
    decode(response).await
}

/// POST a JSON body with a bearer credential and decode the JSON reply
pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
    client: &ClientWithMiddleware,
    url: Url,
    bearer: &str,
    body: &B,
) -> Result<T, FetchError> {
    debug!(host = url.host_str().unwrap_or_default(), path = url.path(), "POST");

    let response = client
        .post(url)
        .header("Authorization", format!("Bearer {bearer}"))
        .json(body)
        .send()
        .await?;
    decode(response).await
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, FetchError> {
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_with_params_encodes_query() {
        let url = url_with_params(
            "https://api.map.baidu.com/",
            "/place/v2/search",
            &[("query", "旅游景点"), ("region", "北京")],
        )
        .unwrap();
        assert_eq!(url.path(), "/place/v2/search");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("query".to_string(), "旅游景点".to_string()));
        assert_eq!(pairs[1], ("region".to_string(), "北京".to_string()));
    }

    #[test]
    fn test_url_with_params_rejects_garbage_base() {
        let result = url_with_params("not a url", "x", &[]);
        assert!(matches!(result, Err(FetchError::InvalidRequest(_))));
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(HttpSettings::new(3, 0, false)).is_ok());
    }
}
