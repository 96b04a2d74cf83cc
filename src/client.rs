// src/client.rs
use crate::error::{ColuError, ColuResult};
use crate::types::ColuConfig;
use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Raw GET transport against the metadata API. Production traffic goes
/// through [`HttpTransport`]; tests install an in-memory implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, endpoint: &str, param: &str) -> ColuResult<serde_json::Value>;
}

/// HTTP transport issuing `GET {base_url}/{endpoint}/{param}`
pub struct HttpTransport {
    base_url: String,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ColuConfig) -> ColuResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, endpoint: &str, param: &str) -> ColuResult<serde_json::Value> {
        let url = format!("{}/{}/{}", self.base_url, endpoint, param);
        debug!("GET {}", url);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ColuError::Api {
                status: response.status().as_u16(),
                endpoint: endpoint.to_string(),
                param: param.to_string(),
            });
        }
        Ok(response.json().await?)
    }
}

/// Fetch client shared by every cached entity. Cloning is cheap, the
/// transport is reference counted.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(config: &ColuConfig) -> ColuResult<Self> {
        Ok(Self {
            transport: Arc::new(HttpTransport::new(config)?),
        })
    }

    /// Build a client over a custom transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Issue a single GET and decode the body into `T`. Sleeps for `delay`
    /// after the request returns: a fixed self-throttle against the remote
    /// API, not a backoff/retry mechanism. Single attempt per call.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        param: &str,
        delay: Duration,
    ) -> ColuResult<T> {
        let value = self.transport.get(endpoint, param).await?;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        serde_json::from_value(value).map_err(|source| ColuError::UnexpectedShape {
            endpoint: endpoint.to_string(),
            param: param.to_string(),
            source,
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_decodes_body() {
        let mock = Arc::new(MockTransport::new());
        mock.respond("addressinfo", "addr1", json!({"address": "addr1", "utxos": []}));
        let client = ApiClient::with_transport(mock.clone());

        let info: crate::types::AddressInfo = client
            .fetch("addressinfo", "addr1", Duration::ZERO)
            .await
            .unwrap();
        assert_eq!(info.address, "addr1");
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_missing_route_is_api_error() {
        let mock = Arc::new(MockTransport::new());
        let client = ApiClient::with_transport(mock);

        let result: ColuResult<crate::types::AddressInfo> =
            client.fetch("addressinfo", "unknown", Duration::ZERO).await;
        match result {
            Err(ColuError::Api { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected Api error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_fetch_shape_mismatch() {
        let mock = Arc::new(MockTransport::new());
        mock.respond("addressinfo", "addr1", json!({"unexpected": true}));
        let client = ApiClient::with_transport(mock);

        let result: ColuResult<crate::types::AddressInfo> =
            client.fetch("addressinfo", "addr1", Duration::ZERO).await;
        assert!(matches!(result, Err(ColuError::UnexpectedShape { .. })));
    }
}
