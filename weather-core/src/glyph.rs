//! Provider condition codes (`"01d"`, `"10n"`, ...) to display glyphs.

/// Shown for any code missing from the table.
pub const DEFAULT_GLYPH: &str = "🌈";

/// Code assumed when the provider omits the icon field.
pub const DEFAULT_CODE: &str = "01d";

/// Static, read-only lookup table. Codes are matched exactly (case-sensitive).
pub struct ConditionCodeMap;

impl ConditionCodeMap {
    pub const ENTRIES: &'static [(&'static str, &'static str)] = &[
        // clear sky
        ("01d", "☀️"),
        ("01n", "🌙"),
        // few clouds
        ("02d", "⛅"),
        ("02n", "☁️"),
        // scattered clouds
        ("03d", "☁️"),
        ("03n", "☁️"),
        // broken clouds
        ("04d", "☁️"),
        ("04n", "☁️"),
        // shower rain
        ("09d", "🌧️"),
        ("09n", "🌧️"),
        // rain
        ("10d", "🌦️"),
        ("10n", "🌧️"),
        // thunderstorm
        ("11d", "⛈️"),
        ("11n", "⛈️"),
        // snow
        ("13d", "❄️"),
        ("13n", "❄️"),
        // mist
        ("50d", "🌫️"),
        ("50n", "🌫️"),
    ];

    pub fn get(code: &str) -> Option<&'static str> {
        Self::ENTRIES.iter().find(|(c, _)| *c == code).map(|(_, glyph)| *glyph)
    }

    /// Glyph for `code`, or [`DEFAULT_GLYPH`] when unknown.
    pub fn lookup(code: &str) -> &'static str {
        Self::get(code).unwrap_or(DEFAULT_GLYPH)
    }
}
