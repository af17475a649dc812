use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::{
    config::DEFAULT_PROVIDER_URL,
    error::{FETCH_FAILED, RelayError},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    base_url: String,
    http: Client,
}

impl Default for OpenWeatherProvider {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_PROVIDER_URL)
    }
}

impl OpenWeatherProvider {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        // No timeout and no retry: a hung provider hangs the relay call.
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_by_city(&self, city: &str, api_key: &str) -> Result<Value, RelayError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to send request to OpenWeather");
                RelayError::upstream(e)
            })?;

        let status = res.status();
        let body: Value = res.json().await.map_err(|e| {
            tracing::error!(error = %e, %status, "Failed to decode OpenWeather response");
            RelayError::upstream(e)
        })?;

        if !status.is_success() {
            tracing::error!(%status, payload = %body, "OpenWeather API error");
            return Err(RelayError::ProviderError {
                status: status.as_u16(),
                message: provider_message(&body),
            });
        }

        Ok(body)
    }
}

/// The provider's `message` field, or the generic failure text.
fn provider_message(body: &Value) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(FETCH_FAILED)
        .to_string()
}
