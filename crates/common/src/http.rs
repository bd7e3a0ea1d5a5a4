//! Outbound HTTP fetch adapter.
//!
//! A single GET returning the parsed JSON body. Transport failures and
//! non-2xx statuses are errors; there is no retry and no timeout knob.

use async_trait::async_trait;
use tracing::debug;

use crate::CoreError;

#[async_trait]
pub trait HttpAdapter: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, CoreError>;
}

/// `reqwest`-backed adapter.
#[derive(Clone, Default)]
pub struct ReqwestAdapter {
    client: reqwest::Client,
}

impl ReqwestAdapter {
    pub fn new(client: reqwest::Client) -> Self { Self { client } }
}

#[async_trait]
impl HttpAdapter for ReqwestAdapter {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, CoreError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CoreError::Network(e.to_string()))?;
        let status = resp.status();
        debug!(%url, status = status.as_u16(), "http_get");
        if !status.is_success() {
            return Err(CoreError::Status { status: status.as_u16(), url: url.to_string() });
        }
        let json = resp
            .json::<serde_json::Value>()
            .await
            .map_err(|e| CoreError::Parse(e.to_string()))?;
        Ok(json)
    }
}

/// Canned adapter for tests; records every requested URL.
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    pub struct MockHttpAdapter {
        response: Result<serde_json::Value, String>,
        requested: Mutex<Vec<String>>,
    }

    impl MockHttpAdapter {
        pub fn ok(body: serde_json::Value) -> Self {
            Self { response: Ok(body), requested: Mutex::new(Vec::new()) }
        }

        /// Every call fails with a network error carrying `message`.
        pub fn failing(message: &str) -> Self {
            Self { response: Err(message.to_string()), requested: Mutex::new(Vec::new()) }
        }

        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpAdapter for MockHttpAdapter {
        async fn get_json(&self, url: &str) -> Result<serde_json::Value, CoreError> {
            self.requested.lock().unwrap().push(url.to_string());
            match &self.response {
                Ok(v) => Ok(v.clone()),
                Err(msg) => Err(CoreError::Network(msg.clone())),
            }
        }
    }
}
