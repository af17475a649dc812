use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

pub const CITY_REQUIRED: &str = "City parameter is required";
pub const KEY_NOT_CONFIGURED: &str = "API key is not configured";
pub const FETCH_FAILED: &str = "Failed to fetch weather data";
pub const EMPTY_INPUT: &str = "Please enter a city name";
pub const GENERIC_FAILURE: &str = "An error occurred. Please try again later.";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures of a single relay invocation. None of them are fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("City parameter is required")]
    InvalidRequest,

    #[error("API key is not configured")]
    Misconfigured,

    /// Provider answered with a non-2xx status.
    #[error("provider returned {status}: {message}")]
    ProviderError { status: u16, message: String },

    /// Network or decode failure while talking to the provider.
    #[error("Failed to fetch weather data")]
    UpstreamUnavailable(#[source] BoxError),
}

impl RelayError {
    pub fn upstream(err: impl Into<BoxError>) -> Self {
        RelayError::UpstreamUnavailable(err.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::InvalidRequest => StatusCode::BAD_REQUEST,
            RelayError::Misconfigured | RelayError::UpstreamUnavailable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RelayError::ProviderError { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }

    /// Message placed in the `error` field of the response body.
    pub fn public_message(&self) -> &str {
        match self {
            RelayError::InvalidRequest => CITY_REQUIRED,
            RelayError::Misconfigured => KEY_NOT_CONFIGURED,
            RelayError::ProviderError { message, .. } => message,
            RelayError::UpstreamUnavailable(_) => FETCH_FAILED,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.public_message() }))).into_response()
    }
}

/// Failures surfaced to the user by the widget.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("Please enter a city name")]
    EmptyInput,

    #[error("{0}")]
    RequestFailed(String),
}

impl LookupError {
    pub fn generic() -> Self {
        LookupError::RequestFailed(GENERIC_FAILURE.to_string())
    }
}
