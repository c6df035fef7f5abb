//! HTTP transport to the analysis backend.

use futures::StreamExt;
use reqwest::Response;
use serde_json::Value;

use crate::api::errors::ApiError;
use crate::config::{API, AppConfig};

/// Response body as a stream of raw byte blocks, in arrival order
#[cfg(not(target_arch = "wasm32"))]
pub type ByteStream = futures::stream::BoxStream<'static, Result<Vec<u8>, ApiError>>;
#[cfg(target_arch = "wasm32")]
pub type ByteStream = futures::stream::LocalBoxStream<'static, Result<Vec<u8>, ApiError>>;

pub type Query = [(&'static str, String)];

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    debug: bool,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_base_url.clone(),
            debug: config.debug,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    pub async fn health(&self) -> Result<Value, ApiError> {
        self.get_json(API.endpoints.health, &[]).await
    }

    pub async fn get_json(&self, endpoint: &str, query: &Query) -> Result<Value, ApiError> {
        let url = self.url(endpoint);
        if self.debug {
            log::debug!("GET {} {:?}", url, query);
        }

        let response = self.http.get(&url).query(query).send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<Value>().await?)
    }

    /// POST `payload` and wait for the whole JSON body.
    pub async fn request_json(
        &self,
        endpoint: &str,
        query: &Query,
        payload: &Value,
    ) -> Result<Value, ApiError> {
        let url = self.url(endpoint);
        if self.debug {
            log::debug!("POST {} {:?}", url, query);
        }

        let response = self.http.post(&url).query(query).json(payload).send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<Value>().await?)
    }

    /// POST `payload` with `stream=true` and hand back the body unbuffered.
    ///
    /// Resolves as soon as the status line and headers are in.
    pub async fn request_stream(
        &self,
        endpoint: &str,
        query: &Query,
        payload: &Value,
    ) -> Result<ByteStream, ApiError> {
        let url = self.url(endpoint);
        if self.debug {
            log::debug!("POST {} {:?} (streaming)", url, query);
        }

        let response = self
            .http
            .post(&url)
            .query(query)
            .query(&[(API.framing.stream_param, "true")])
            .json(payload)
            .send()
            .await?;
        let response = check_status(response).await?;

        let blocks = response
            .bytes_stream()
            .map(|block| block.map(|bytes| bytes.to_vec()).map_err(ApiError::from));

        #[cfg(not(target_arch = "wasm32"))]
        return Ok(blocks.boxed());
        #[cfg(target_arch = "wasm32")]
        return Ok(blocks.boxed_local());
    }
}

/// Query for endpoints that switch between streamed and buffered output
pub fn buffered_query() -> Vec<(&'static str, String)> {
    vec![(API.framing.stream_param, "false".to_string())]
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        code: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls_join_cleanly() {
        let config = AppConfig::new("http://backend:9000/", false, "info");
        let client = ApiClient::new(&config);
        assert_eq!(client.base_url(), "http://backend:9000");
        assert_eq!(
            client.url(API.endpoints.recommendations),
            "http://backend:9000/positions/recommendations"
        );
    }

    #[test]
    fn buffered_query_disables_streaming() {
        assert_eq!(buffered_query(), vec![("stream", "false".to_string())]);
    }
}
