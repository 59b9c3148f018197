use serde::{Deserialize, Serialize};

/// Provider-assigned identifier for a geocoded place. Opaque; immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub String);

impl LocationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Geocoder result: the first match for a city query.
#[derive(Debug, Clone)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
}

/// Current conditions as QWeather reports them. All wire fields are strings;
/// numeric values are parsed on demand by the formatter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub temp: String,
    #[serde(rename = "feelsLike")]
    pub feels_like: String,
    pub humidity: String,
    #[serde(rename = "windSpeed")]
    pub wind_speed: String,
    #[serde(rename = "windDir")]
    pub wind_dir: Option<String>,
    pub vis: Option<String>,
    pub text: String,
}

/// Full `/v7/weather/now` response body. Cached verbatim, one file per location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherDocument {
    pub code: String,
    #[serde(rename = "updateTime")]
    pub update_time: String,
    pub now: Observation,
}

/// Temperature unit selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    #[default]
    Celsius,
    Fahrenheit,
}
