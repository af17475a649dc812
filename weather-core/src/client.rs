use reqwest::Client;
use serde_json::Value;

use crate::{
    error::{FETCH_FAILED, LookupError},
    model::{DisplayWeather, ProviderResponse},
    relay::WEATHER_PATH,
};

/// Widget-side HTTP client for the relay endpoint.
#[derive(Debug, Clone)]
pub struct RelayClient {
    base_url: String,
    http: Client,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up `city` (already trimmed and non-empty) through the relay.
    pub async fn lookup(&self, city: &str) -> Result<DisplayWeather, LookupError> {
        let url = format!("{}{}", self.base_url, WEATHER_PATH);

        let res = self
            .http
            .get(&url)
            .query(&[("city", city)])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Error fetching weather data");
                LookupError::generic()
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            tracing::error!(error = %e, "Error reading relay response");
            LookupError::generic()
        })?;

        if !status.is_success() {
            let message = relay_error_message(&body);
            tracing::warn!(%status, %message, "relay rejected weather lookup");
            return Err(LookupError::RequestFailed(message));
        }

        let raw: ProviderResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, "Error decoding weather data");
            LookupError::RequestFailed(e.to_string())
        })?;

        Ok(DisplayWeather::from_provider(&raw))
    }
}

/// The relay's `error` field, or the generic fetch failure text.
fn relay_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|v| v.get("error"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(FETCH_FAILED)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_error_message_extraction() {
        assert_eq!(relay_error_message(r#"{"error":"city not found"}"#), "city not found");
        assert_eq!(relay_error_message(r#"{"error":""}"#), FETCH_FAILED);
        assert_eq!(relay_error_message(r#"{"detail":"nope"}"#), FETCH_FAILED);
        assert_eq!(relay_error_message("<html>Bad Gateway</html>"), FETCH_FAILED);
    }

    #[test]
    fn new_trims_trailing_slash() {
        assert_eq!(RelayClient::new("http://localhost:3000/").base_url(), "http://localhost:3000");
    }
}
