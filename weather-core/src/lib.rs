//! Core library for the `weather` relay and widget.
//!
//! This crate defines:
//! - Configuration handling (relay bind address, provider URL, key variable)
//! - The relay endpoint that forwards city lookups to the weather provider
//! - The normalizer that turns provider JSON into a display model
//! - The widget state machine driven by the CLI
//!
//! It is used by `weather-cli`, but can also be embedded in other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod glyph;
pub mod model;
pub mod provider;
pub mod relay;
pub mod widget;

pub use client::RelayClient;
pub use config::{ClientConfig, Config, RelayConfig};
pub use error::{LookupError, RelayError};
pub use model::{DisplayWeather, ProviderResponse};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use relay::{KeySource, RelayState};
pub use widget::{Theme, ViewState, WeatherWidget};
