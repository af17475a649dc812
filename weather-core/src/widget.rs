//! Widget state machine and terminal rendering.

use std::fmt::Write;

use crate::{client::RelayClient, error::LookupError, model::DisplayWeather};

/// Exactly one of these holds at any time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Error(String),
    Success(DisplayWeather),
}

impl ViewState {
    pub fn weather(&self) -> Option<&DisplayWeather> {
        match self {
            ViewState::Success(w) => Some(w),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Global presentation attribute set while this theme is active.
    pub fn attribute(self) -> Option<&'static str> {
        match self {
            Theme::Light => None,
            Theme::Dark => Some("dark"),
        }
    }
}

#[derive(Debug)]
pub struct WeatherWidget {
    client: RelayClient,
    state: ViewState,
    theme: Theme,
}

impl WeatherWidget {
    pub fn new(client: RelayClient) -> Self {
        Self {
            client,
            state: ViewState::Idle,
            theme: Theme::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading)
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Validate input and enter `Loading`, dropping any previous result or error.
    /// Returns the trimmed city to send to the relay.
    pub fn begin(&mut self, city: &str) -> Result<String, LookupError> {
        let city = city.trim();
        if city.is_empty() {
            self.state = ViewState::Error(LookupError::EmptyInput.to_string());
            return Err(LookupError::EmptyInput);
        }

        self.state = ViewState::Loading;
        Ok(city.to_string())
    }

    /// Leave `Loading` with the outcome of the relay call.
    pub fn finish(&mut self, result: Result<DisplayWeather, LookupError>) {
        self.state = match result {
            Ok(weather) => ViewState::Success(weather),
            Err(e) => ViewState::Error(e.to_string()),
        };
    }

    /// Run one complete lookup. No network call happens for empty input.
    pub async fn submit(&mut self, city: &str) -> &ViewState {
        let city = match self.begin(city) {
            Ok(city) => city,
            Err(_) => return &self.state,
        };

        let result = self.client.lookup(&city).await;
        self.finish(result);
        &self.state
    }

    pub fn render(&self) -> String {
        render(&self.state, self.theme)
    }
}

const DARK_ON: &str = "\x1b[7m";
const DARK_OFF: &str = "\x1b[0m";

/// Plain-text card for the current state.
pub fn render(state: &ViewState, theme: Theme) -> String {
    let mut out = String::new();

    match state {
        ViewState::Idle => {}
        ViewState::Loading => out.push_str("Loading..."),
        ViewState::Error(msg) => out.push_str(msg),
        ViewState::Success(w) => {
            // Writing into a String cannot fail.
            let _ = writeln!(out, "{}, {}", w.name, w.country);
            let _ = writeln!(out, "{}", w.icon);
            let _ = writeln!(out, "{}", w.description);
            let _ = write!(out, "{}°C  {}%  {} m/s", w.temp, w.humidity, w.wind_speed);
        }
    }

    match theme.attribute() {
        Some(_) if !out.is_empty() => format!("{DARK_ON}{out}{DARK_OFF}"),
        _ => out,
    }
}
