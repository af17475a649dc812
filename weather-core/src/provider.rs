use async_trait::async_trait;
use std::fmt::Debug;

use crate::{config::RelayConfig, error::RelayError, provider::openweather::OpenWeatherProvider};

pub mod openweather;

/// Upstream weather service the relay forwards to.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for `city`, returned as the provider's untouched JSON body.
    async fn current_by_city(
        &self,
        city: &str,
        api_key: &str,
    ) -> Result<serde_json::Value, RelayError>;
}

/// Construct the configured provider.
pub fn provider_from_config(config: &RelayConfig) -> Box<dyn WeatherProvider> {
    Box::new(OpenWeatherProvider::with_base_url(config.provider_url.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_uses_configured_url() {
        let cfg = RelayConfig {
            provider_url: "http://localhost:9999/weather".into(),
            ..RelayConfig::default()
        };

        let provider = provider_from_config(&cfg);
        assert!(format!("{provider:?}").contains("http://localhost:9999/weather"));
    }
}
