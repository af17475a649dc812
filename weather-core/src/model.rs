use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::glyph::{ConditionCodeMap, DEFAULT_CODE};

pub const UNKNOWN_COUNTRY: &str = "Unknown";
pub const NO_DESCRIPTION: &str = "No description available";

/// Subset of the provider's "current weather" payload the widget reads.
///
/// Every field is optional and anything else in the payload is ignored.
/// A field holding a value of the wrong type reads as absent, so its
/// display default applies instead of failing the whole lookup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderResponse {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub sys: Option<ProviderSys>,
    #[serde(deserialize_with = "lenient")]
    pub main: Option<ProviderMain>,
    /// Only `weather[0]` is consumed.
    #[serde(rename = "weather", deserialize_with = "lenient_first")]
    pub condition: Option<ProviderCondition>,
    #[serde(deserialize_with = "lenient")]
    pub wind: Option<ProviderWind>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderSys {
    #[serde(deserialize_with = "lenient")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderMain {
    #[serde(deserialize_with = "lenient")]
    pub temp: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderCondition {
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderWind {
    #[serde(deserialize_with = "lenient")]
    pub speed: Option<f64>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_first<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let first = match Value::deserialize(deserializer)? {
        Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
        _ => return Ok(None),
    };
    Ok(serde_json::from_value(first).ok())
}

/// UI-ready view of one successful lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayWeather {
    pub name: String,
    pub country: String,
    /// Degrees Celsius, rounded.
    pub temp: i64,
    pub description: String,
    /// Percent, rounded.
    pub humidity: i64,
    /// Metres per second.
    pub wind_speed: f64,
    pub icon: &'static str,
}

impl DisplayWeather {
    pub fn from_provider(raw: &ProviderResponse) -> Self {
        let condition = raw.condition.as_ref();

        let country = raw.sys.as_ref().and_then(|s| non_empty(s.country.as_deref()));
        let description = condition.and_then(|c| non_empty(c.description.as_deref()));
        let icon_code = condition.and_then(|c| non_empty(c.icon.as_deref()));
        let temp = raw.main.as_ref().and_then(|m| m.temp).unwrap_or(0.0);
        let humidity = raw.main.as_ref().and_then(|m| m.humidity).unwrap_or(0.0);

        Self {
            name: raw.name.clone().unwrap_or_default(),
            country: country.unwrap_or(UNKNOWN_COUNTRY).to_string(),
            temp: round_half_up(temp),
            description: description.unwrap_or(NO_DESCRIPTION).to_string(),
            humidity: round_half_up(humidity),
            wind_speed: raw.wind.as_ref().and_then(|w| w.speed).unwrap_or(0.0),
            icon: ConditionCodeMap::lookup(icon_code.unwrap_or(DEFAULT_CODE)),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

// Halves round towards positive infinity (-2.5 -> -2).
fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}
