//! The `/api/weather` relay endpoint.
//!
//! Each request is independent: validate the city, resolve the provider
//! key, make exactly one upstream call, and pass the JSON through.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde_json::Value;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::RelayConfig,
    error::RelayError,
    provider::{WeatherProvider, provider_from_config},
};

pub const WEATHER_PATH: &str = "/api/weather";

/// Where the provider credential comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Read the named environment variable on every request.
    Env(String),
    /// A key fixed at construction time (`None` means "not configured").
    Fixed(Option<String>),
}

impl KeySource {
    /// The current key. An empty value counts as absent.
    pub fn resolve(&self) -> Option<String> {
        let key = match self {
            KeySource::Env(var) => std::env::var(var).ok(),
            KeySource::Fixed(key) => key.clone(),
        };
        key.filter(|k| !k.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct RelayState {
    provider: Arc<dyn WeatherProvider>,
    keys: KeySource,
}

impl RelayState {
    pub fn new(provider: impl WeatherProvider + 'static, keys: KeySource) -> Self {
        Self {
            provider: Arc::new(provider),
            keys,
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        Self {
            provider: Arc::from(provider_from_config(config)),
            keys: KeySource::Env(config.api_key_env.clone()),
        }
    }
}

/// First `city` value of the query string; later repeats are ignored.
fn first_city(pairs: Vec<(String, String)>) -> Option<String> {
    pairs.into_iter().find(|(name, _)| name == "city").map(|(_, value)| value)
}

pub fn router(state: RelayState) -> Router {
    Router::new()
        .route(WEATHER_PATH, get(weather))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the relay until the listener fails.
pub async fn serve(listener: TcpListener, state: RelayState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "weather relay listening");
    }
    axum::serve(listener, router(state)).await
}

async fn weather(
    State(state): State<RelayState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, RelayError> {
    let Some(city) = first_city(pairs).filter(|c| !c.is_empty()) else {
        tracing::warn!("weather lookup without a city parameter");
        return Err(RelayError::InvalidRequest);
    };

    let Some(api_key) = state.keys.resolve() else {
        tracing::error!("provider API key is not configured");
        return Err(RelayError::Misconfigured);
    };

    tracing::debug!(%city, "relaying weather lookup");
    let body = state.provider.current_by_city(&city, &api_key).await?;

    Ok(Json(body))
}
